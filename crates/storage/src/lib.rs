// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable storage for lot occupancy
//!
//! State lives in a write-ahead log shared by every process that opens the
//! same directory; [`LotStore`] replays it into a [`LotState`].

mod journal;
mod ledger;
mod operation;
mod state;
mod store;
mod wal;

pub use journal::{JournalError, Session, SessionJournal};
pub use ledger::{LedgerError, SpotLedger};
pub use operation::{ExpireOp, LeaveOp, Operation, ParkOp};
pub use state::{ApplyError, LotState};
pub use store::{LotStore, StoreError, LOCK_FILE, WAL_FILE};
pub use wal::{Wal, WalCorruption, WalEntry, WalError, WalRead};
