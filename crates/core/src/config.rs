// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lot configuration
//!
//! The set of spots is static configuration: it is read at startup and never
//! changed by parking operations. Spots may be listed explicitly, generated
//! from a row layout, or both.
//!
//! ```toml
//! spots = ["A01", "A02"]
//! max_stay = "8765.82"
//! sweep_interval = "60s"
//!
//! [layout]
//! rows = ["B", "C"]
//! per_row = 10
//! ```

use crate::spot::SpotCode;
use crate::stay::StayCap;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default interval between expiration sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Environment variable naming the config file when no path is given
pub const CONFIG_ENV: &str = "LOT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no parking spots configured")]
    NoSpots,
    #[error("spot {0} is configured more than once")]
    DuplicateSpot(SpotCode),
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    #[error("sweep_interval must be greater than zero")]
    ZeroInterval,
    #[error("no config file given (use --config or set {CONFIG_ENV})")]
    NoConfigPath,
    #[error("could not determine state directory")]
    NoStateDir,
}

/// Config file to load: the explicit path, else `$LOT_CONFIG`
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    std::env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigPath)
}

/// Rows of consecutively numbered spots
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
    /// Row letters, e.g. `["A", "B"]`
    pub rows: Vec<String>,
    /// Spots per row, numbered from 01
    pub per_row: u32,
}

impl Layout {
    fn spots(&self) -> Result<Vec<SpotCode>, ConfigError> {
        if !(1..=99).contains(&self.per_row) {
            return Err(ConfigError::InvalidLayout(format!(
                "per_row must be between 1 and 99, got {}",
                self.per_row
            )));
        }
        let mut spots = Vec::new();
        for row in &self.rows {
            for n in 1..=self.per_row {
                let code = SpotCode::parse(&format!("{row}{n:02}"))
                    .map_err(|_| ConfigError::InvalidLayout(format!("invalid row {row:?}")))?;
                spots.push(code);
            }
        }
        Ok(spots)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    spots: Vec<SpotCode>,
    layout: Option<Layout>,
    #[serde(default)]
    max_stay: StayCap,
    #[serde(default = "default_sweep_interval", with = "humantime_serde")]
    sweep_interval: Duration,
    data_dir: Option<PathBuf>,
}

fn default_sweep_interval() -> Duration {
    DEFAULT_SWEEP_INTERVAL
}

/// Validated lot configuration
#[derive(Debug, Clone)]
pub struct LotConfig {
    /// All spots of the lot, ascending by code
    pub spots: Vec<SpotCode>,
    /// Longest stay a single park request may ask for
    pub max_stay: StayCap,
    /// How often the expiration sweeper runs
    pub sweep_interval: Duration,
    /// Where the lot's journal lives; binaries pick a default when unset
    pub data_dir: Option<PathBuf>,
}

impl LotConfig {
    /// Build a config for the given spots with default settings
    pub fn new(spots: impl IntoIterator<Item = SpotCode>) -> Result<Self, ConfigError> {
        Self::validated(spots.into_iter().collect(), StayCap::default())
    }

    pub fn with_max_stay(mut self, cap: StayCap) -> Self {
        self.max_stay = cap;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Parse a config from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        if raw.sweep_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }

        let mut spots = raw.spots;
        if let Some(layout) = &raw.layout {
            spots.extend(layout.spots()?);
        }

        let config = Self::validated(spots, raw.max_stay)?;
        Ok(Self {
            sweep_interval: raw.sweep_interval,
            data_dir: raw.data_dir,
            ..config
        })
    }

    /// Load a config file
    ///
    /// A relative `data_dir` is taken relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        if let (Some(dir), Some(base)) = (&config.data_dir, path.parent()) {
            if dir.is_relative() {
                config.data_dir = Some(base.join(dir));
            }
        }
        Ok(config)
    }

    /// Where the lot's journal lives
    ///
    /// The configured `data_dir`, else `$XDG_STATE_HOME/lot`, else
    /// `~/.local/state/lot`.
    pub fn resolved_data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
            return Ok(PathBuf::from(xdg).join("lot"));
        }
        dirs::home_dir()
            .map(|home| home.join(".local/state/lot"))
            .ok_or(ConfigError::NoStateDir)
    }

    fn validated(spots: Vec<SpotCode>, max_stay: StayCap) -> Result<Self, ConfigError> {
        if spots.is_empty() {
            return Err(ConfigError::NoSpots);
        }
        let mut seen = BTreeSet::new();
        for spot in &spots {
            if !seen.insert(spot.clone()) {
                return Err(ConfigError::DuplicateSpot(spot.clone()));
            }
        }
        Ok(Self {
            spots: seen.into_iter().collect(),
            max_stay,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            data_dir: None,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
