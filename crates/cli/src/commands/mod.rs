// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod park;
pub mod query;
pub mod submit;
pub mod sweep;

use anyhow::Result;
use lot_core::{resolve_config_path, LotConfig};
use lot_engine::Planner;
use lot_storage::LotStore;
use std::path::Path;
use std::sync::Arc;

use crate::output::OutputFormat;

/// Everything a command needs: the loaded lot and how to print results
pub struct Context {
    pub config: LotConfig,
    pub planner: Planner,
    pub format: OutputFormat,
}

impl Context {
    pub fn open(config: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let path = resolve_config_path(config)?;
        let config = LotConfig::load(&path)?;
        let data_dir = config.resolved_data_dir()?;

        let store = LotStore::open(&data_dir, config.spots.clone())?;
        let planner = Planner::new(Arc::new(store), config.max_stay);

        Ok(Self {
            config,
            planner,
            format,
        })
    }
}
