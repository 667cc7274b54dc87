// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay
//!
//! `LotState` is the in-memory view of a lot: the spot ledger and the
//! session journal, rebuilt by applying WAL operations in order. Every
//! operation touches both structures or neither.

use crate::journal::{JournalError, SessionJournal};
use crate::ledger::{LedgerError, SpotLedger};
use crate::operation::{ExpireOp, LeaveOp, Operation, ParkOp};
use lot_core::{Plate, SpotCode};
use thiserror::Error;

/// Error applying an operation to state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Journal(#[from] JournalError),
    #[error("plate {plate} is not parked at {spot}")]
    NotParkedAt { plate: Plate, spot: SpotCode },
}

#[derive(Debug, Clone, Default)]
pub struct LotState {
    ledger: SpotLedger,
    journal: SessionJournal,
}

impl LotState {
    /// Empty lot with every given spot vacant
    pub fn new(spots: impl IntoIterator<Item = SpotCode>) -> Self {
        Self {
            ledger: SpotLedger::new(spots),
            journal: SessionJournal::new(),
        }
    }

    /// Verify that `apply(op)` would succeed, without changing anything
    pub fn check(&self, op: &Operation) -> Result<(), ApplyError> {
        match op {
            Operation::Park(ParkOp { spot, plate, .. }) => {
                self.ledger.check_reserve(spot, plate)?;
                self.journal.check_open(spot, plate)?;
            }
            Operation::Leave(LeaveOp { spot, plate, .. }) => {
                if self.ledger.find_spot_for_plate(plate) != Some(spot) {
                    return Err(ApplyError::NotParkedAt {
                        plate: plate.clone(),
                        spot: spot.clone(),
                    });
                }
                if self.journal.open_session_for_plate(plate).is_none() {
                    return Err(JournalError::NoOpenSession(plate.clone()).into());
                }
            }
            Operation::Expire(ExpireOp { spots, .. }) => {
                if let Some(unknown) = spots.iter().find(|s| !self.ledger.exists(s)) {
                    return Err(LedgerError::UnknownSpot(unknown.clone()).into());
                }
            }
        }
        Ok(())
    }

    /// Apply an operation, all or nothing
    pub fn apply(&mut self, op: &Operation) -> Result<(), ApplyError> {
        self.check(op)?;

        match op {
            Operation::Park(park) => {
                self.ledger.reserve(&park.spot, &park.plate)?;
                self.journal.open_session(
                    &park.spot,
                    &park.plate,
                    park.arrival,
                    park.length_of_stay,
                    park.departure,
                )?;
            }
            Operation::Leave(leave) => {
                self.ledger.release(&leave.spot);
                self.journal.close_session(&leave.plate, leave.departed_at)?;
            }
            Operation::Expire(expire) => {
                for spot in &expire.spots {
                    self.journal.mark_expired(spot);
                }
            }
        }
        Ok(())
    }

    pub fn ledger(&self) -> &SpotLedger {
        &self.ledger
    }

    pub fn journal(&self) -> &SessionJournal {
        &self.journal
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
