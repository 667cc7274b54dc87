// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Format validation for values supplied by callers
//!
//! Every check is a pure predicate. Callers decide which error a failed
//! check maps to; see `lot_engine::ParkingError`.

use regex::Regex;
use std::sync::LazyLock;

/// Exact length of a license plate, separators included
pub const PLATE_LEN: usize = 8;

// Allow expect here as the patterns are compile-time constants
#[allow(clippy::expect_used)]
static PLATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{1,3}-[A-Z0-9]{1,3}-[A-Z0-9]{1,3}$")
        .expect("constant regex pattern is valid")
});

// Hours are 1-4 digits, minutes are exactly two digits (not a decimal fraction)
#[allow(clippy::expect_used)]
static STAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,4}\.[0-9]{2}$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("constant regex pattern is valid")
});

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Check a license plate: three dash-separated groups of 1-3 uppercase
/// letters or digits, 8 characters in total.
pub fn validate_plate(plate: &str) -> bool {
    plate.len() == PLATE_LEN && PLATE_PATTERN.is_match(plate)
}

/// Check a length-of-stay string of the form `H.MM` (1-4 hour digits).
pub fn validate_length_of_stay(stay: &str) -> bool {
    STAY_PATTERN.is_match(stay)
}

/// Check a username: ASCII letters and digits only, and not the word "username".
pub fn validate_username(username: &str) -> bool {
    USERNAME_PATTERN.is_match(username) && !username.eq_ignore_ascii_case("username")
}

/// Check an email address has the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check a password: 8-10 characters with at least one lowercase letter,
/// uppercase letter, digit and special character from `@$!%*?&`.
pub fn validate_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(8..=10).contains(&len) || password.eq_ignore_ascii_case("password") {
        return false;
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
