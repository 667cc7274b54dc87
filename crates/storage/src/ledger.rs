// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spot ledger: which plate occupies which spot
//!
//! The set of spots is fixed when the ledger is built. Only occupancy
//! changes. A reverse index keeps plate lookups O(1).

use lot_core::{Plate, SpotCode};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("unknown spot: {0}")]
    UnknownSpot(SpotCode),
    #[error("spot {spot} is occupied by {plate}")]
    Occupied { spot: SpotCode, plate: Plate },
    #[error("plate {plate} already occupies spot {spot}")]
    PlateElsewhere { plate: Plate, spot: SpotCode },
}

/// Occupancy of every configured spot
#[derive(Debug, Clone, Default)]
pub struct SpotLedger {
    spots: BTreeMap<SpotCode, Option<Plate>>,
    by_plate: HashMap<Plate, SpotCode>,
}

impl SpotLedger {
    /// Build a ledger with all given spots vacant
    pub fn new(spots: impl IntoIterator<Item = SpotCode>) -> Self {
        Self {
            spots: spots.into_iter().map(|s| (s, None)).collect(),
            by_plate: HashMap::new(),
        }
    }

    pub fn exists(&self, spot: &SpotCode) -> bool {
        self.spots.contains_key(spot)
    }

    /// True iff the spot exists and nobody occupies it
    pub fn is_vacant(&self, spot: &SpotCode) -> bool {
        matches!(self.spots.get(spot), Some(None))
    }

    /// Verify that `reserve(spot, plate)` would succeed
    pub fn check_reserve(&self, spot: &SpotCode, plate: &Plate) -> Result<(), LedgerError> {
        match self.spots.get(spot) {
            None => return Err(LedgerError::UnknownSpot(spot.clone())),
            Some(Some(holder)) => {
                return Err(LedgerError::Occupied {
                    spot: spot.clone(),
                    plate: holder.clone(),
                })
            }
            Some(None) => {}
        }
        if let Some(other) = self.by_plate.get(plate) {
            return Err(LedgerError::PlateElsewhere {
                plate: plate.clone(),
                spot: other.clone(),
            });
        }
        Ok(())
    }

    /// Occupy a vacant spot
    ///
    /// Fails without changing anything if the spot is unknown or taken, or if
    /// the plate already occupies another spot.
    pub fn reserve(&mut self, spot: &SpotCode, plate: &Plate) -> Result<(), LedgerError> {
        self.check_reserve(spot, plate)?;
        self.spots.insert(spot.clone(), Some(plate.clone()));
        self.by_plate.insert(plate.clone(), spot.clone());
        Ok(())
    }

    /// Clear a spot, returning the plate that occupied it
    ///
    /// Releasing a vacant or unknown spot is a no-op.
    pub fn release(&mut self, spot: &SpotCode) -> Option<Plate> {
        let plate = self.spots.get_mut(spot)?.take()?;
        self.by_plate.remove(&plate);
        Some(plate)
    }

    pub fn find_spot_for_plate(&self, plate: &Plate) -> Option<&SpotCode> {
        self.by_plate.get(plate)
    }

    /// Vacant spots, ascending by code
    pub fn list_vacant(&self) -> Vec<SpotCode> {
        self.spots
            .iter()
            .filter(|(_, plate)| plate.is_none())
            .map(|(spot, _)| spot.clone())
            .collect()
    }

    /// Lowest vacant spot code
    pub fn first_vacant(&self) -> Option<&SpotCode> {
        self.spots
            .iter()
            .find(|(_, plate)| plate.is_none())
            .map(|(spot, _)| spot)
    }

    /// Occupied spots and their plates, ascending by code
    pub fn list_occupied(&self) -> BTreeMap<SpotCode, Plate> {
        self.spots
            .iter()
            .filter_map(|(spot, plate)| plate.as_ref().map(|p| (spot.clone(), p.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn occupied_count(&self) -> usize {
        self.by_plate.len()
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
