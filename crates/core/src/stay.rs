// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-of-stay arithmetic
//!
//! A length of stay is written `H.MM`: whole hours, a dot, and two digits of
//! minutes. `"1.30"` is one hour thirty minutes, not 1.3 hours. The minute
//! part is taken literally, so `"1.75"` is 1h75m.

use crate::validate::validate_length_of_stay;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default cap on a single stay, roughly one year in `hours.minutes`
pub const DEFAULT_STAY_CAP: &str = "8765.82";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StayError {
    #[error("invalid length of stay: {0:?}")]
    Format(String),
    #[error("departure time out of range")]
    OutOfRange,
}

/// A parsed `H.MM` length of stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LengthOfStay {
    pub hours: u32,
    pub minutes: u32,
}

impl LengthOfStay {
    /// Parse a string that must already match the `H.MM` format
    pub fn parse(stay: &str) -> Result<Self, StayError> {
        if !validate_length_of_stay(stay) {
            return Err(StayError::Format(stay.to_string()));
        }
        let (hours, minutes) = split_hours_minutes(stay)?;
        Ok(Self { hours, minutes })
    }

    /// Elapsed time of the stay: `hours` hours plus `minutes` minutes
    pub fn as_duration(&self) -> Duration {
        Duration::hours(i64::from(self.hours)) + Duration::minutes(i64::from(self.minutes))
    }

    /// Numeric value of the written form in hundredths (`"12.34"` is 1234)
    pub fn hundredths(&self) -> u64 {
        u64::from(self.hours) * 100 + u64::from(self.minutes)
    }
}

impl fmt::Display for LengthOfStay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hours, self.minutes)
    }
}

impl FromStr for LengthOfStay {
    type Err = StayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LengthOfStay {
    type Error = StayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LengthOfStay> for String {
    fn from(stay: LengthOfStay) -> Self {
        stay.to_string()
    }
}

fn split_hours_minutes(stay: &str) -> Result<(u32, u32), StayError> {
    let format_err = || StayError::Format(stay.to_string());
    let (hours, minutes) = stay.split_once('.').ok_or_else(format_err)?;
    let hours = hours.parse().map_err(|_| format_err())?;
    let minutes = minutes.parse().map_err(|_| format_err())?;
    Ok((hours, minutes))
}

/// Planned arrival and departure of a stay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub arrival: DateTime<Utc>,
    pub departure: DateTime<Utc>,
}

/// Arrival is `now`; departure is `now` plus the length of stay.
pub fn compute_stay(now: DateTime<Utc>, length: &LengthOfStay) -> Result<Stay, StayError> {
    let departure = now
        .checked_add_signed(length.as_duration())
        .ok_or(StayError::OutOfRange)?;
    Ok(Stay {
        arrival: now,
        departure,
    })
}

/// Upper bound on a single stay, compared on the written `hours.minutes` value
///
/// No rounding is applied: a stay is rejected iff its value is strictly
/// greater than the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StayCap {
    hundredths: u64,
}

impl StayCap {
    /// Parse a cap written as `H.MM` or `H.M`
    pub fn parse(cap: &str) -> Result<Self, StayError> {
        let format_err = || StayError::Format(cap.to_string());
        let (hours, fraction) = cap.split_once('.').unwrap_or((cap, "0"));
        if hours.is_empty()
            || fraction.is_empty()
            || fraction.len() > 2
            || !hours.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(format_err());
        }
        let hours: u64 = hours.parse().map_err(|_| format_err())?;
        let mut fraction: u64 = fraction.parse().map_err(|_| format_err())?;
        if cap.split_once('.').is_some_and(|(_, f)| f.len() == 1) {
            fraction *= 10;
        }
        Ok(Self {
            hundredths: hours * 100 + fraction,
        })
    }

    pub fn exceeds(&self, length: &LengthOfStay) -> bool {
        length.hundredths() > self.hundredths
    }
}

impl Default for StayCap {
    fn default() -> Self {
        Self {
            hundredths: 876_582,
        }
    }
}

impl fmt::Display for StayCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

impl TryFrom<String> for StayCap {
    type Error = StayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StayCap> for String {
    fn from(cap: StayCap) -> Self {
        cap.to_string()
    }
}

#[cfg(test)]
#[path = "stay_tests.rs"]
mod tests;
