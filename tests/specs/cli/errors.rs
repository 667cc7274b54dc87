//! CLI error specs
//!
//! Verify config problems are reported before any lot operation runs.

use crate::prelude::*;

#[test]
fn missing_config_is_reported() {
    cli()
        .args(&["count"])
        .exits(78)
        .stderr_has("no config file given")
        .stderr_has("suggestions:");
}

#[test]
fn config_from_environment_is_used() {
    let lot = Project::empty();
    cli()
        .env("LOT_CONFIG", lot.config_path())
        .args(&["count"])
        .passes()
        .stdout_eq("3\n");
}

#[test]
fn config_without_spots_is_rejected() {
    let lot = Project::with_config("spots = []\ndata_dir = \"state\"\n");
    lot.lot()
        .args(&["count"])
        .exits(78)
        .stderr_has("no parking spots configured");
}

#[test]
fn duplicate_spots_are_rejected() {
    let lot = Project::with_spots(&["A01", "A01"]);
    lot.lot()
        .args(&["vacant"])
        .exits(78)
        .stderr_has("A01");
}

#[test]
fn layout_generates_spots() {
    let lot = Project::with_config(
        "data_dir = \"state\"\n\n[layout]\nrows = [\"A\", \"B\"]\nper_row = 2\n",
    );
    lot.lot()
        .args(&["vacant"])
        .passes()
        .stdout_eq("A01\nA02\nB01\nB02\n");
}

#[test]
fn state_lives_in_configured_data_dir() {
    let lot = Project::empty();
    lot.park("A01", "AB-123-C", "1.00");
    assert!(lot.path().join("state/lot.wal").is_file());
}

#[test]
fn submit_missing_data() {
    let lot = Project::empty();
    lot.lot()
        .args(&["submit", r#"{"op": "leave"}"#])
        .exits(1)
        .stderr_has("Missing data.");
}

#[test]
fn submit_from_stdin() {
    let lot = Project::empty();
    lot.lot()
        .args(&["submit", "-"])
        .stdin(r#"{"op": "park", "parking_spot": "A02", "license_plate": "AB-123-C", "length_of_stay": "1.00"}"#)
        .passes()
        .stdout_eq("A02\n");
}
