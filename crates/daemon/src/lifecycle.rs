// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use lot_core::{resolve_config_path, Clock, ConfigError, LotConfig, SystemClock};
use lot_engine::Sweeper;
use lot_storage::{LotStore, StoreError};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Lot settings from the config file
    pub lot: LotConfig,
    /// Directory holding the lot's WAL
    pub data_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
}

impl Config {
    /// Load the config file named on the command line or by `$LOT_CONFIG`
    pub fn load(explicit: Option<&Path>) -> Result<Self, LifecycleError> {
        let path = resolve_config_path(explicit)?;
        let lot = LotConfig::load(&path)?;
        Self::for_lot(lot)
    }

    pub fn for_lot(lot: LotConfig) -> Result<Self, LifecycleError> {
        let data_dir = lot.resolved_data_dir()?;
        Ok(Self {
            lock_path: data_dir.join("lotd.pid"),
            log_path: data_dir.join("lotd.log"),
            data_dir,
            lot,
        })
    }
}

/// Daemon state during operation
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    pub store: Arc<LotStore>,
    shutdown_tx: watch::Sender<bool>,
    sweeper: JoinHandle<()>,
}

impl DaemonState {
    /// Stop the sweeper and release the pid file
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        // Receiver may already be gone if the sweeper task ended
        let _ = self.shutdown_tx.send(true);
        self.sweeper
            .await
            .map_err(|e| LifecycleError::Sweeper(e.to_string()))?;

        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sweeper task failed: {0}")]
    Sweeper(String),
}

/// Start the daemon
pub async fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    match startup_inner(config).await {
        Ok(state) => Ok(state),
        // The pid file belongs to the daemon that holds the lock
        Err(e @ LifecycleError::LockFailed(_)) => Err(e),
        Err(e) => {
            cleanup_on_failure(config);
            Err(e)
        }
    }
}

async fn startup_inner(config: &Config) -> Result<DaemonState, LifecycleError> {
    std::fs::create_dir_all(&config.data_dir)?;

    // Acquire lock before touching anything else; do not truncate a live
    // daemon's pid
    let mut lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    let store = Arc::new(LotStore::open(&config.data_dir, config.lot.spots.clone())?);
    report_state(&store, &SystemClock)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = Sweeper::new(Arc::clone(&store), SystemClock, config.lot.sweep_interval);
    let sweeper = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    info!(
        data_dir = %config.data_dir.display(),
        spots = config.lot.spots.len(),
        max_stay = %config.lot.max_stay,
        "Daemon started"
    );

    Ok(DaemonState {
        config: config.clone(),
        lock_file,
        store,
        shutdown_tx,
        sweeper,
    })
}

fn cleanup_on_failure(config: &Config) {
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

/// Log what the journal holds from earlier runs
fn report_state(store: &LotStore, clock: &impl Clock) -> Result<(), LifecycleError> {
    let now = clock.now();
    let (occupied, open, overdue) = store.read(|state| {
        (
            state.ledger().occupied_count(),
            state.journal().open_count(),
            state.journal().open_sessions_past_due(now).len(),
        )
    })?;

    info!(occupied, open_sessions = open, "Loaded lot state");
    if overdue > 0 {
        warn!(
            overdue,
            "open sessions are past due and not yet flagged; the next sweep will flag them"
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
