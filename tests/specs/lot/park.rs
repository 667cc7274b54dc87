//! Park specs
//!
//! Verify reservations and the order in which bad requests are rejected.

use crate::prelude::*;

#[test]
fn park_prints_confirmed_spot() {
    let lot = Project::empty();
    lot.lot()
        .args(&["park", "A02", "AB-123-C", "2.30"])
        .passes()
        .stdout_eq("A02\n");
}

#[test]
fn parked_vehicle_is_listed_as_occupied() {
    let lot = Project::empty();
    lot.park("A02", "AB-123-C", "2.30");

    lot.lot()
        .args(&["occupied"])
        .passes()
        .stdout_has("A02")
        .stdout_has("AB-123-C");
}

#[test]
fn stay_is_checked_before_anything_else() {
    let lot = Project::empty();
    lot.lot()
        .args(&["park", "a1", "bad", "bad"])
        .exits(1)
        .stderr_has("Invalid length of stay entered.");
}

#[test]
fn invalid_spot_is_checked_before_plate() {
    let lot = Project::empty();
    lot.lot()
        .args(&["park", "a1", "bad", "1.00"])
        .exits(1)
        .stderr_has("This is not a valid parking spot number.");
}

#[test]
fn unknown_spot_is_invalid() {
    let lot = Project::empty();
    lot.lot()
        .args(&["park", "Z99", "AB-123-C", "1.00"])
        .exits(1)
        .stderr_has("This is not a valid parking spot number.");
}

#[test]
fn taken_spot_is_not_available() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "1.00");

    lot.lot()
        .args(&["park", "A01", "CD-456-E", "1.00"])
        .exits(1)
        .stderr_has("The selected spot is currently not available.");
}

#[test]
fn invalid_plate_is_rejected_after_spot_checks() {
    let lot = Project::empty();
    lot.lot()
        .args(&["park", "A01", "ab-123-c", "1.00"])
        .exits(1)
        .stderr_has("This is not a valid license plate number.");
}

#[test]
fn plate_in_another_spot_is_rejected() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "1.00");

    lot.lot()
        .args(&["park", "A02", "AB-123-C", "1.00"])
        .exits(1)
        .stderr_has("This license plate is already linked to another parking spot currently in use.");
}

#[test]
fn malformed_stay_is_rejected() {
    let lot = Project::empty();
    for stay in ["2", "2.5", "2,30", "12345.00"] {
        lot.lot()
            .args(&["park", "A01", "AB-123-C", stay])
            .exits(1)
            .stderr_has("Invalid length of stay entered.");
    }
}

#[test]
fn stay_over_a_year_is_rejected() {
    let lot = Project::empty();
    lot.lot()
        .args(&["park", "A01", "AB-123-C", "8765.83"])
        .exits(1)
        .stderr_has("A vehicle cannot occupy a spot for longer than a year.");

    lot.lot()
        .args(&["park", "A01", "AB-123-C", "8765.82"])
        .passes()
        .stdout_eq("A01\n");
}

#[test]
fn configured_cap_applies() {
    let lot = Project::with_config(
        "spots = [\"A01\"]\nmax_stay = \"24.00\"\ndata_dir = \"state\"\n",
    );
    lot.lot()
        .args(&["park", "A01", "AB-123-C", "24.01"])
        .exits(1)
        .stderr_has("A vehicle cannot occupy a spot for longer than a year.");
}

#[test]
fn rejected_park_changes_nothing() {
    let lot = Project::empty();
    lot.lot()
        .args(&["park", "A01", "AB-123-C", "9999.00"])
        .exits(1);

    lot.lot()
        .args(&["count"])
        .passes()
        .stdout_eq("3\n");
}
