// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session journal: one record per stay
//!
//! Sessions are never removed. A session is open until the vehicle leaves;
//! at most one open session exists per plate and per spot.
//!
//! ## Flags
//!
//! - `left` is terminal: set once when the vehicle departs, together with
//!   `actual_departure`.
//! - `expired` is a monitoring marker set by the sweeper while the session
//!   is still open and its expected departure has passed. It never evicts
//!   and is never cleared.

use chrono::{DateTime, Utc};
use lot_core::{LengthOfStay, Plate, SpotCode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    #[error("plate {0} already has an open session")]
    PlateHasOpenSession(Plate),
    #[error("spot {0} already has an open session")]
    SpotHasOpenSession(SpotCode),
    #[error("no open session for plate {0}")]
    NoOpenSession(Plate),
}

/// One parking stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub spot: SpotCode,
    pub plate: Plate,
    pub arrival: DateTime<Utc>,
    pub length_of_stay: LengthOfStay,
    pub expected_departure: DateTime<Utc>,
    pub left: bool,
    pub actual_departure: Option<DateTime<Utc>>,
    pub expired: bool,
}

impl Session {
    pub fn is_open(&self) -> bool {
        !self.left
    }

    /// Open, not yet flagged, and past its expected departure
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && !self.expired && now > self.expected_departure
    }
}

/// Append-only log of sessions with indexes over the open ones
#[derive(Debug, Clone, Default)]
pub struct SessionJournal {
    sessions: Vec<Session>,
    open_by_plate: HashMap<Plate, usize>,
    open_by_spot: HashMap<SpotCode, usize>,
}

impl SessionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify that a session for `spot` and `plate` may be opened
    pub fn check_open(&self, spot: &SpotCode, plate: &Plate) -> Result<(), JournalError> {
        if self.open_by_plate.contains_key(plate) {
            return Err(JournalError::PlateHasOpenSession(plate.clone()));
        }
        if self.open_by_spot.contains_key(spot) {
            return Err(JournalError::SpotHasOpenSession(spot.clone()));
        }
        Ok(())
    }

    /// Record the start of a stay
    pub fn open_session(
        &mut self,
        spot: &SpotCode,
        plate: &Plate,
        arrival: DateTime<Utc>,
        length_of_stay: LengthOfStay,
        expected_departure: DateTime<Utc>,
    ) -> Result<&Session, JournalError> {
        self.check_open(spot, plate)?;

        let index = self.sessions.len();
        self.sessions.push(Session {
            spot: spot.clone(),
            plate: plate.clone(),
            arrival,
            length_of_stay,
            expected_departure,
            left: false,
            actual_departure: None,
            expired: false,
        });
        self.open_by_plate.insert(plate.clone(), index);
        self.open_by_spot.insert(spot.clone(), index);
        Ok(&self.sessions[index])
    }

    /// Close the open session of `plate`
    pub fn close_session(
        &mut self,
        plate: &Plate,
        actual_departure: DateTime<Utc>,
    ) -> Result<&Session, JournalError> {
        let index = self
            .open_by_plate
            .remove(plate)
            .ok_or_else(|| JournalError::NoOpenSession(plate.clone()))?;

        let session = &mut self.sessions[index];
        self.open_by_spot.remove(&session.spot);
        session.left = true;
        session.actual_departure = Some(actual_departure);
        Ok(session)
    }

    /// Flag the open session at `spot` as expired
    ///
    /// Returns false when there is no open session at the spot or it is
    /// already flagged. Closed sessions are never touched.
    pub fn mark_expired(&mut self, spot: &SpotCode) -> bool {
        let Some(&index) = self.open_by_spot.get(spot) else {
            return false;
        };
        let session = &mut self.sessions[index];
        if session.expired {
            return false;
        }
        session.expired = true;
        true
    }

    /// Open, unflagged sessions whose expected departure is before `now`
    pub fn open_sessions_past_due(&self, now: DateTime<Utc>) -> Vec<(SpotCode, DateTime<Utc>)> {
        let mut due: Vec<_> = self
            .open_sessions()
            .filter(|s| s.is_past_due(now))
            .map(|s| (s.spot.clone(), s.expected_departure))
            .collect();
        due.sort();
        due
    }

    /// Expected departure of every open session, by spot
    pub fn all_open_sessions(&self) -> BTreeMap<SpotCode, DateTime<Utc>> {
        self.open_sessions()
            .map(|s| (s.spot.clone(), s.expected_departure))
            .collect()
    }

    pub fn open_session_for_plate(&self, plate: &Plate) -> Option<&Session> {
        self.open_by_plate.get(plate).map(|&i| &self.sessions[i])
    }

    pub fn open_session_at(&self, spot: &SpotCode) -> Option<&Session> {
        self.open_by_spot.get(spot).map(|&i| &self.sessions[i])
    }

    pub fn open_sessions(&self) -> impl Iterator<Item = &Session> {
        self.open_by_spot.values().map(|&i| &self.sessions[i])
    }

    /// Full history, in the order stays began
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn open_count(&self) -> usize {
        self.open_by_spot.len()
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
