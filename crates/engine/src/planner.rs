// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Allocation planner
//!
//! Validates requests against the ledger and journal and commits each
//! accepted park or leave as a single store transaction. All checks that
//! depend on lot state run inside the transaction, so two callers racing
//! for one spot cannot both pass the vacancy check.
//!
//! `park` reports the first failing check in this order: length of stay
//! format, stay cap, spot exists, spot vacant, plate format, plate already
//! parked.

use crate::error::ParkingError;
use chrono::{DateTime, Utc};
use lot_core::{compute_stay, validate_plate, LengthOfStay, Plate, SpotCode, StayCap};
use lot_storage::{LeaveOp, LotStore, Operation, ParkOp};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for every caller-facing lot operation
#[derive(Clone)]
pub struct Planner {
    store: Arc<LotStore>,
    max_stay: StayCap,
}

impl Planner {
    pub fn new(store: Arc<LotStore>, max_stay: StayCap) -> Self {
        Self { store, max_stay }
    }

    /// Reserve `spot` for `plate`, arriving at `now`
    pub fn park(
        &self,
        spot: &str,
        plate: &str,
        length_of_stay: &str,
        now: DateTime<Utc>,
    ) -> Result<SpotCode, ParkingError> {
        let result = self.try_park(spot, plate, length_of_stay, now);
        match &result {
            Ok(spot) => info!(%spot, plate, length_of_stay, "parked"),
            Err(e) => debug!(kind = e.kind(), spot, plate, length_of_stay, "park rejected"),
        }
        result
    }

    fn try_park(
        &self,
        spot: &str,
        plate: &str,
        length_of_stay: &str,
        now: DateTime<Utc>,
    ) -> Result<SpotCode, ParkingError> {
        let length =
            LengthOfStay::parse(length_of_stay).map_err(|_| ParkingError::InvalidLengthOfStay)?;
        if self.max_stay.exceeds(&length) {
            return Err(ParkingError::TooLong);
        }
        let stay = compute_stay(now, &length).map_err(|_| ParkingError::InvalidLengthOfStay)?;

        self.store.transact(|state| {
            let ledger = state.ledger();
            let spot = SpotCode::parse(spot)
                .ok()
                .filter(|s| ledger.exists(s))
                .ok_or(ParkingError::InvalidSpotNumber)?;
            if !ledger.is_vacant(&spot) {
                return Err(ParkingError::SpotNotAvailable);
            }
            let plate = Plate::parse(plate).map_err(|_| ParkingError::InvalidPlateNumber)?;
            if ledger.find_spot_for_plate(&plate).is_some()
                || state.journal().open_session_for_plate(&plate).is_some()
            {
                return Err(ParkingError::VehicleAlreadyInOtherSpot);
            }

            let op = Operation::Park(ParkOp {
                spot: spot.clone(),
                plate,
                arrival: stay.arrival,
                length_of_stay: length,
                departure: stay.departure,
            });
            Ok((spot, Some(op)))
        })
    }

    /// Release the spot held by `plate` and close its session at `now`
    ///
    /// Returns the spot that became vacant.
    pub fn leave(&self, plate: &str, now: DateTime<Utc>) -> Result<SpotCode, ParkingError> {
        let result = self.try_leave(plate, now);
        match &result {
            Ok(spot) => info!(%spot, plate, "left"),
            Err(e) => debug!(kind = e.kind(), plate, "leave rejected"),
        }
        result
    }

    fn try_leave(&self, plate: &str, now: DateTime<Utc>) -> Result<SpotCode, ParkingError> {
        let plate = Plate::parse(plate).map_err(|_| ParkingError::InvalidPlateNumber)?;
        self.store.transact(|state| {
            let spot = state
                .ledger()
                .find_spot_for_plate(&plate)
                .cloned()
                .ok_or(ParkingError::LicensePlateNotFound)?;
            let op = Operation::Leave(LeaveOp {
                spot: spot.clone(),
                plate: plate.clone(),
                departed_at: now,
            });
            Ok((spot, Some(op)))
        })
    }

    /// Spot currently held by `plate`
    ///
    /// An unknown plate is reported as malformed only when it also fails the
    /// plate format.
    pub fn plate_location(&self, plate: &str) -> Result<SpotCode, ParkingError> {
        let found = self.store.read(|state| {
            Plate::parse(plate)
                .ok()
                .and_then(|p| state.ledger().find_spot_for_plate(&p).cloned())
        })?;
        match found {
            Some(spot) => Ok(spot),
            None if !validate_plate(plate) => Err(ParkingError::InvalidPlateNumber),
            None => Err(ParkingError::LicensePlateNotFound),
        }
    }

    /// Vacant spots, ascending by code
    pub fn vacant_spots(&self) -> Result<Vec<SpotCode>, ParkingError> {
        let vacant = self.store.read(|state| state.ledger().list_vacant())?;
        if vacant.is_empty() {
            return Err(ParkingError::NoSpotsAvailable);
        }
        Ok(vacant)
    }

    pub fn vacant_count(&self) -> Result<usize, ParkingError> {
        self.vacant_spots().map(|spots| spots.len())
    }

    /// Occupied spots and the plates in them, ascending by code
    pub fn occupied(&self) -> Result<BTreeMap<SpotCode, Plate>, ParkingError> {
        let occupied = self.store.read(|state| state.ledger().list_occupied())?;
        if occupied.is_empty() {
            return Err(ParkingError::AllSpotsAvailable);
        }
        Ok(occupied)
    }

    /// Spot most likely to be free next
    ///
    /// The lowest vacant spot if there is one. Otherwise the open session
    /// whose expected departure is nearest to `now` in either direction,
    /// with ties going to the lowest spot code. Does not reserve anything.
    pub fn next_available_spot(&self, now: DateTime<Utc>) -> Result<SpotCode, ParkingError> {
        self.store.read(|state| {
            if let Some(spot) = state.ledger().first_vacant() {
                return Ok(spot.clone());
            }
            state
                .journal()
                .all_open_sessions()
                .into_iter()
                .min_by_key(|(_, departure)| (*departure - now).abs())
                .map(|(spot, _)| spot)
                .ok_or(ParkingError::NoSpotsConfigured)
        })?
    }

    pub fn store(&self) -> &Arc<LotStore> {
        &self.store
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
