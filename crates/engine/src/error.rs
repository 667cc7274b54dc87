// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lot operations

use lot_storage::StoreError;
use thiserror::Error;

/// Every way a lot operation can fail
///
/// All variants except `StorageUnavailable` are terminal for the request.
#[derive(Debug, Error)]
pub enum ParkingError {
    #[error("This is not a valid license plate number.")]
    InvalidPlateNumber,
    #[error("This is not a valid parking spot number.")]
    InvalidSpotNumber,
    #[error("Invalid length of stay entered.")]
    InvalidLengthOfStay,
    #[error("A vehicle cannot occupy a spot for longer than a year.")]
    TooLong,
    #[error("The selected spot is currently not available.")]
    SpotNotAvailable,
    #[error("This license plate is already linked to another parking spot currently in use.")]
    VehicleAlreadyInOtherSpot,
    #[error(
        "There are no vehicles with this license plate number currently parked in the parking lot."
    )]
    LicensePlateNotFound,
    #[error("There are no spots available at the moment.")]
    NoSpotsAvailable,
    #[error("All parking spots are currently available")]
    AllSpotsAvailable,
    #[error("The parking lot has no spots configured.")]
    NoSpotsConfigured,
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

impl ParkingError {
    /// True if retrying the same request later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ParkingError::StorageUnavailable(_))
    }

    /// Stable machine-readable code
    pub fn kind(&self) -> &'static str {
        match self {
            ParkingError::InvalidPlateNumber => "invalid_plate_number",
            ParkingError::InvalidSpotNumber => "invalid_spot_number",
            ParkingError::InvalidLengthOfStay => "invalid_length_of_stay",
            ParkingError::TooLong => "too_long",
            ParkingError::SpotNotAvailable => "spot_not_available",
            ParkingError::VehicleAlreadyInOtherSpot => "vehicle_already_in_other_spot",
            ParkingError::LicensePlateNotFound => "license_plate_not_found",
            ParkingError::NoSpotsAvailable => "no_spots_available",
            ParkingError::AllSpotsAvailable => "all_spots_available",
            ParkingError::NoSpotsConfigured => "no_spots_configured",
            ParkingError::StorageUnavailable(_) => "storage_unavailable",
        }
    }

    /// True for the "nothing matched" outcomes rather than rejected input
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ParkingError::LicensePlateNotFound
                | ParkingError::NoSpotsAvailable
                | ParkingError::AllSpotsAvailable
        )
    }
}
