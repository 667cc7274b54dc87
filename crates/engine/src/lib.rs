// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Parking lot engine: allocation planner and expiration sweeper

mod error;
mod planner;
mod sweeper;

pub use error::ParkingError;
pub use planner::Planner;
pub use sweeper::Sweeper;
