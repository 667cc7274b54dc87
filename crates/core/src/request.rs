// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decoding of loosely typed caller requests
//!
//! Request bodies arrive as JSON objects. A missing field and a field of the
//! wrong type are reported as input errors, separately from format checks on
//! the string values themselves.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("malformed request: {0}")]
    Json(String),
    #[error("request must be a JSON object")]
    NotAnObject,
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("field {0} must be a string")]
    NotAString(&'static str),
    #[error("unknown operation: {0}")]
    UnknownOp(String),
}

/// A caller request with raw, not yet format-checked values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Park {
        spot: String,
        plate: String,
        length_of_stay: String,
    },
    Leave {
        plate: String,
    },
    Locate {
        plate: String,
    },
    VacantSpots,
    VacantCount,
    Occupied,
    NextAvailable,
}

impl Request {
    /// Parse a request from a JSON document
    pub fn from_json(body: &str) -> Result<Self, InputError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| InputError::Json(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Decode a request from a JSON value
    ///
    /// The `op` field selects the operation; each operation then reads its
    /// own string fields.
    pub fn from_value(value: &Value) -> Result<Self, InputError> {
        let fields = value.as_object().ok_or(InputError::NotAnObject)?;
        let op = string_field(fields, "op")?;

        match op.as_str() {
            "park" => Ok(Request::Park {
                spot: string_field(fields, "parking_spot")?,
                plate: string_field(fields, "license_plate")?,
                length_of_stay: string_field(fields, "length_of_stay")?,
            }),
            "leave" => Ok(Request::Leave {
                plate: string_field(fields, "license_plate")?,
            }),
            "locate" => Ok(Request::Locate {
                plate: string_field(fields, "license_plate")?,
            }),
            "vacant" => Ok(Request::VacantSpots),
            "count" => Ok(Request::VacantCount),
            "occupied" => Ok(Request::Occupied),
            "next" => Ok(Request::NextAvailable),
            _ => Err(InputError::UnknownOp(op)),
        }
    }
}

fn string_field(fields: &Map<String, Value>, name: &'static str) -> Result<String, InputError> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(InputError::MissingField(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(InputError::NotAString(name)),
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
