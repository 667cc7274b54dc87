// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lot-core: Core types for the parking lot occupancy service
//!
//! This crate provides:
//! - Clock abstraction (system and fake)
//! - Spot and plate identifiers
//! - Format validation for caller-supplied values
//! - Length-of-stay arithmetic and the stay cap
//! - Lot configuration
//! - Decoding of JSON requests

pub mod clock;
pub mod config;
pub mod request;
pub mod spot;
pub mod stay;
pub mod validate;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{
    resolve_config_path, ConfigError, Layout, LotConfig, CONFIG_ENV, DEFAULT_SWEEP_INTERVAL,
};
pub use request::{InputError, Request};
pub use spot::{IdError, Plate, SpotCode};
pub use stay::{compute_stay, LengthOfStay, Stay, StayCap, StayError, DEFAULT_STAY_CAP};
pub use validate::{
    validate_email, validate_length_of_stay, validate_password, validate_plate,
    validate_username,
};
