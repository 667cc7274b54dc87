// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing error display and exit codes.
//!
//! Every failure is reduced to:
//! - What went wrong (message)
//! - A stable machine-readable kind
//! - The process exit code
//! - How to fix it (suggestions), when there is something to suggest

use lot_core::{ConfigError, InputError};
use lot_engine::ParkingError;
use lot_storage::StoreError;
use std::fmt;

/// Rejected input: bad format, missing field, spot taken
pub const EXIT_INVALID: i32 = 1;
/// Nothing matched: unknown plate, no vacant spots, nothing occupied
pub const EXIT_NOT_FOUND: i32 = 2;
/// Storage could not be reached; the same request may succeed later
pub const EXIT_TEMPFAIL: i32 = 75;
/// The config file is missing or invalid
pub const EXIT_CONFIG: i32 = 78;

#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub kind: &'static str,
    pub exit_code: i32,
    pub suggestions: Vec<String>,
}

impl CliError {
    pub fn new(kind: &'static str, message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            kind,
            exit_code,
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    fn from_parking(e: &ParkingError) -> Self {
        let exit_code = if e.is_transient() {
            EXIT_TEMPFAIL
        } else if e.is_not_found() {
            EXIT_NOT_FOUND
        } else {
            EXIT_INVALID
        };
        let error = Self::new(e.kind(), e.to_string(), exit_code);
        match e {
            ParkingError::StorageUnavailable(_) => error
                .with_suggestion("Retry the request")
                .with_suggestion("Check that the lot's data directory is writable"),
            ParkingError::NoSpotsConfigured => {
                error.with_suggestion("Add spots or a [layout] to the lot config")
            }
            _ => error,
        }
    }

    fn from_input(e: &InputError) -> Self {
        match e {
            InputError::MissingField(_) => Self::new("missing_data", "Missing data.", EXIT_INVALID),
            InputError::NotAString(_) => Self::new("not_a_string", e.to_string(), EXIT_INVALID),
            InputError::Json(_) | InputError::NotAnObject => {
                Self::new("malformed_request", e.to_string(), EXIT_INVALID)
            }
            InputError::UnknownOp(_) => Self::new("unknown_op", e.to_string(), EXIT_INVALID)
                .with_suggestion(
                    "Use one of: park, leave, locate, vacant, count, occupied, next",
                ),
        }
    }

    fn from_config(e: &ConfigError) -> Self {
        let error = Self::new("config", e.to_string(), EXIT_CONFIG);
        match e {
            ConfigError::NoConfigPath => error.with_suggestion("lot --config lot.toml <command>"),
            ConfigError::NoStateDir => {
                error.with_suggestion("Set data_dir in the lot config")
            }
            _ => error,
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(e) = e.downcast_ref::<ParkingError>() {
            return Self::from_parking(e);
        }
        if let Some(e) = e.downcast_ref::<InputError>() {
            return Self::from_input(e);
        }
        if let Some(e) = e.downcast_ref::<ConfigError>() {
            return Self::from_config(e);
        }
        if let Some(e) = e.downcast_ref::<StoreError>() {
            return Self::new("storage_unavailable", e.to_string(), EXIT_TEMPFAIL)
                .with_suggestion("Check that the lot's data directory is writable");
        }
        Self::new("error", format!("{:#}", e), EXIT_INVALID)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}
