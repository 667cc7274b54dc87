// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL operation types
//!
//! Every state change is one operation, and one operation is one
//! transaction: a park reserves the spot and opens the session together, a
//! leave releases the spot and closes the session together.

use chrono::{DateTime, Utc};
use lot_core::{LengthOfStay, Plate, SpotCode};
use serde::{Deserialize, Serialize};

/// All state-changing operations on a lot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Reserve a spot and open a session
    Park(ParkOp),
    /// Release a spot and close its session
    Leave(LeaveOp),
    /// Flag open sessions as expired
    Expire(ExpireOp),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkOp {
    pub spot: SpotCode,
    pub plate: Plate,
    pub arrival: DateTime<Utc>,
    pub length_of_stay: LengthOfStay,
    pub departure: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveOp {
    pub spot: SpotCode,
    pub plate: Plate,
    pub departed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpireOp {
    pub spots: Vec<SpotCode>,
    pub at: DateTime<Utc>,
}

impl Operation {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Park(_) => "park",
            Operation::Leave(_) => "leave",
            Operation::Expire(_) => "expire",
        }
    }
}
