//! Leave specs

use crate::prelude::*;

#[test]
fn leave_frees_the_spot() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "1.00");

    lot.lot()
        .args(&["leave", "AB-123-C"])
        .passes()
        .stdout_eq("Parking spot now available.\n");

    lot.lot()
        .args(&["vacant"])
        .passes()
        .stdout_eq("A01\nA02\nA03\n");
}

#[test]
fn freed_spot_can_be_parked_again() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "1.00");
    lot.lot().args(&["leave", "AB-123-C"]).passes();

    lot.lot()
        .args(&["park", "A01", "CD-456-E", "1.00"])
        .passes()
        .stdout_eq("A01\n");
}

#[test]
fn leaving_twice_is_not_found() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "1.00");
    lot.lot().args(&["leave", "AB-123-C"]).passes();

    lot.lot()
        .args(&["leave", "AB-123-C"])
        .exits(2)
        .stderr_has(
            "There are no vehicles with this license plate number currently parked in the parking lot.",
        );
}

#[test]
fn malformed_plate_is_invalid() {
    let lot = Project::empty();
    lot.lot()
        .args(&["leave", "AB123C"])
        .exits(1)
        .stderr_has("This is not a valid license plate number.");
}
