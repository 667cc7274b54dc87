//! Sweep specs
//!
//! Overdue sessions are flagged, never evicted.

use crate::prelude::*;

#[test]
fn sweep_with_nothing_due() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "1.00");

    lot.lot()
        .args(&["sweep"])
        .passes()
        .stdout_eq("No overdue sessions\n");
}

#[test]
fn sweep_flags_overdue_session_once() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "0.00");

    lot.lot()
        .args(&["sweep"])
        .passes()
        .stdout_eq("Flagged 1 overdue session\n");
    lot.lot()
        .args(&["sweep"])
        .passes()
        .stdout_eq("No overdue sessions\n");
}

#[test]
fn flagged_vehicle_keeps_its_spot() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "0.00");
    lot.lot().args(&["sweep"]).passes();

    lot.lot()
        .args(&["locate", "AB-123-C"])
        .passes()
        .stdout_eq("A01\n");
    lot.lot()
        .args(&["leave", "AB-123-C"])
        .passes()
        .stdout_eq("Parking spot now available.\n");
}

#[test]
fn sweep_reports_json_count() {
    let lot = Project::empty();
    lot.park("A01", "AB-100-C", "0.00");
    lot.park("A02", "AB-200-C", "0.00");

    lot.lot()
        .args(&["--json", "sweep"])
        .passes()
        .stdout_has("\"flagged\": 2");
}
