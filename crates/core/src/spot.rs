// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifiers for parking spots and the vehicles occupying them

use crate::validate::validate_plate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string that is not a well-formed identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("invalid spot code: {0:?} (expected one uppercase letter and two digits)")]
    Spot(String),
    #[error("invalid license plate: {0:?}")]
    Plate(String),
}

/// Code of a parking spot, e.g. `A01`
///
/// Codes order lexicographically, so `A02 < A10 < B01`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpotCode(String);

impl SpotCode {
    /// Parse a spot code: one ASCII uppercase letter followed by two digits
    pub fn parse(code: &str) -> Result<Self, IdError> {
        let bytes = code.as_bytes();
        let well_formed = bytes.len() == 3
            && bytes[0].is_ascii_uppercase()
            && bytes[1].is_ascii_digit()
            && bytes[2].is_ascii_digit();
        if well_formed {
            Ok(Self(code.to_string()))
        } else {
            Err(IdError::Spot(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpotCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SpotCode {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SpotCode> for String {
    fn from(code: SpotCode) -> Self {
        code.0
    }
}

/// A license plate that passed [`validate_plate`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Plate(String);

impl Plate {
    pub fn parse(plate: &str) -> Result<Self, IdError> {
        if validate_plate(plate) {
            Ok(Self(plate.to_string()))
        } else {
            Err(IdError::Plate(plate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Plate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Plate {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Plate> for String {
    fn from(plate: Plate) -> Self {
        plate.0
    }
}

#[cfg(test)]
#[path = "spot_tests.rs"]
mod tests;
