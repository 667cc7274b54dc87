//! Query specs
//!
//! Verify locate, vacant, count, occupied and next.

use crate::prelude::*;

#[test]
fn locate_finds_parked_vehicle() {
    let lot = Project::empty();
    lot.park("A03", "AB-123-C", "1.00");

    lot.lot()
        .args(&["locate", "AB-123-C"])
        .passes()
        .stdout_eq("A03\n");
}

#[test]
fn locate_unknown_plate_is_not_found() {
    let lot = Project::empty();
    lot.lot()
        .args(&["locate", "AB-123-C"])
        .exits(2)
        .stderr_has(
            "There are no vehicles with this license plate number currently parked in the parking lot.",
        );
}

#[test]
fn locate_malformed_plate_is_invalid() {
    let lot = Project::empty();
    lot.lot()
        .args(&["locate", "nope"])
        .exits(1)
        .stderr_has("This is not a valid license plate number.");
}

#[test]
fn vacant_lists_free_spots_in_order() {
    let lot = Project::with_spots(&["B01", "A10", "A02"]);
    lot.park("A10", "AB-123-C", "1.00");

    lot.lot()
        .args(&["vacant"])
        .passes()
        .stdout_eq("A02\nB01\n");
}

#[test]
fn full_lot_has_no_vacant_spots() {
    let lot = Project::with_spots(&["A01"]);
    lot.park("A01", "AB-123-C", "1.00");

    lot.lot()
        .args(&["vacant"])
        .exits(2)
        .stderr_has("There are no spots available at the moment.");
    lot.lot()
        .args(&["count"])
        .exits(2)
        .stderr_has("There are no spots available at the moment.");
}

#[test]
fn count_reports_vacant_spots() {
    let lot = Project::empty();
    lot.park("A02", "AB-123-C", "1.00");

    lot.lot().args(&["count"]).passes().stdout_eq("2\n");
}

#[test]
fn empty_lot_has_nothing_occupied() {
    let lot = Project::empty();
    lot.lot()
        .args(&["occupied"])
        .exits(2)
        .stderr_has("All parking spots are currently available");
}

#[test]
fn next_prefers_lowest_vacant_spot() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "1.00");

    lot.lot().args(&["next"]).passes().stdout_eq("A02\n");
}

#[test]
fn next_in_full_lot_is_nearest_departure() {
    let lot = Project::with_spots(&["A01", "A02", "A03"]);
    lot.park("A01", "AB-100-C", "5.00");
    lot.park("A02", "AB-200-C", "0.10");
    lot.park("A03", "AB-300-C", "2.00");

    lot.lot().args(&["next"]).passes().stdout_eq("A02\n");
}

#[test]
fn next_counts_overdue_sessions_by_distance() {
    let lot = Project::with_spots(&["A01", "A02"]);
    lot.park("A01", "AB-100-C", "3.00");
    lot.park("A02", "AB-200-C", "0.00");

    lot.lot().args(&["next"]).passes().stdout_eq("A02\n");
}
