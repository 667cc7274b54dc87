// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a lot config with the given spots and state under `state/`.
/// Returns the TempDir (cleaned up on drop) and the config path.
pub fn setup_lot(spots: &[&str]) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let config = temp.path().join("lot.toml");
    let spots: Vec<String> = spots.iter().map(|s| format!("\"{}\"", s)).collect();
    std::fs::write(
        &config,
        format!("spots = [{}]\ndata_dir = \"state\"\n", spots.join(", ")),
    )
    .expect("Failed to write config");
    (temp, config)
}

/// `lot --config <config>` with a clean environment
pub fn lot(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lot").expect("lot binary is built");
    cmd.env_remove("LOT_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

/// Same as [`lot`] but as a plain process, for spawning in parallel
pub fn lot_process(config: &Path) -> std::process::Command {
    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("lot"));
    cmd.env_remove("LOT_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}
