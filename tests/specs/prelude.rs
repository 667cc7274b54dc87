//! Shared harness for behavioral specs.
//!
//! A `Project` is a temp directory holding `lot.toml` with its state under
//! `state/`. Commands are built with `project.lot()` and checked with
//! `passes()` / `fails()` followed by output assertions.

#![allow(dead_code)]

pub use predicates::prelude::*;

use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

pub struct Project {
    dir: TempDir,
    config: PathBuf,
}

impl Project {
    /// A lot with spots A01, A02, A03
    pub fn empty() -> Self {
        Self::with_spots(&["A01", "A02", "A03"])
    }

    pub fn with_spots(spots: &[&str]) -> Self {
        let quoted: Vec<String> = spots.iter().map(|s| format!("\"{s}\"")).collect();
        Self::with_config(&format!(
            "spots = [{}]\ndata_dir = \"state\"\n",
            quoted.join(", ")
        ))
    }

    /// A lot from raw TOML; `data_dir` should point inside the project
    pub fn with_config(toml: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("lot.toml");
        std::fs::write(&config, toml).unwrap();
        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config
    }

    /// `lot --config <project>/lot.toml`
    pub fn lot(&self) -> CliBuilder {
        CliBuilder::new().arg("--config").arg(self.config.to_str().unwrap())
    }

    /// Park a vehicle, asserting success
    pub fn park(&self, spot: &str, plate: &str, stay: &str) {
        self.lot().args(&["park", spot, plate, stay]).passes();
    }
}

/// `lot` with no config at all
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    fn new() -> Self {
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin("lot"));
        cmd.env_remove("LOT_CONFIG").env_remove("RUST_LOG");
        Self { cmd }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.cmd.arg(arg);
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, body: &str) -> Self {
        self.cmd.write_stdin(body.to_string());
        self
    }

    /// Run and expect exit 0
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout: {}\nstderr: {}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and expect a non-zero exit
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout: {}",
            run.stdout()
        );
        run
    }

    /// Run and expect exactly `code`
    pub fn exits(self, code: i32) -> RunAssert {
        let run = self.fails();
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "stderr: {}",
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout has {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }
}
