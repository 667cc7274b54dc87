// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared lot storage with check-then-act transactions
//!
//! A store directory holds `lot.wal` and `lot.lock`. Any number of processes
//! may open the same directory. Writers take an exclusive `flock` on the
//! lock file, catch up on entries other processes appended, decide against
//! that fresh state, and append while still holding the lock. Readers take
//! a shared lock and only catch up.
//!
//! Within one process a mutex serializes callers, since `flock` does not
//! exclude threads sharing a file descriptor.

use crate::operation::Operation;
use crate::state::{ApplyError, LotState};
use crate::wal::{Wal, WalError};
use fs2::FileExt;
use lot_core::SpotCode;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const WAL_FILE: &str = "lot.wal";
pub const LOCK_FILE: &str = "lot.lock";

/// Errors from LotStore operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAL error: {0}")]
    Wal(#[from] WalError),
    #[error("failed to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("apply error: {0}")]
    Apply(#[from] ApplyError),
}

struct Inner {
    wal: Wal,
    state: LotState,
}

impl Inner {
    /// Apply whatever other writers appended since the last catch-up
    ///
    /// With `repair` set (exclusive lock held) a corrupt tail is cut off so
    /// the next append lands after the last valid entry.
    fn catch_up(&mut self, repair: bool) -> Result<(), StoreError> {
        let read = self.wal.read_new()?;
        for entry in &read.entries {
            if let Err(e) = self.state.apply(&entry.operation) {
                warn!(
                    sequence = entry.sequence,
                    op = entry.operation.name(),
                    error = %e,
                    "skipping WAL entry that does not apply"
                );
            }
        }

        if let Some(corruption) = read.corruption {
            if repair {
                let removed = self.wal.truncate_to_valid()?;
                warn!(
                    offset = corruption.offset,
                    removed,
                    reason = %corruption.reason,
                    "truncated corrupt WAL tail"
                );
            } else {
                warn!(
                    offset = corruption.offset,
                    reason = %corruption.reason,
                    "WAL corruption detected; the next write will repair it"
                );
            }
        }
        Ok(())
    }
}

/// Releases the flock when dropped
struct LockGuard<'a>(&'a File);

impl<'a> LockGuard<'a> {
    fn exclusive(file: &'a File, path: &Path) -> Result<Self, StoreError> {
        FileExt::lock_exclusive(file).map_err(|source| StoreError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self(file))
    }

    fn shared(file: &'a File, path: &Path) -> Result<Self, StoreError> {
        FileExt::lock_shared(file).map_err(|source| StoreError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self(file))
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(self.0) {
            warn!(error = %e, "failed to release store lock");
        }
    }
}

/// Durable, multi-process lot state
pub struct LotStore {
    dir: PathBuf,
    lock_path: PathBuf,
    lock: File,
    inner: Mutex<Inner>,
}

impl LotStore {
    /// Open or create the store in `dir` for the given set of spots
    ///
    /// Replays the existing log. Entries naming spots outside `spots` are
    /// skipped with a warning.
    pub fn open(
        dir: &Path,
        spots: impl IntoIterator<Item = SpotCode>,
    ) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        let lock_path = dir.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        let writer_id = uuid::Uuid::new_v4().to_string();
        let wal = Wal::open(&dir.join(WAL_FILE), &writer_id)?;
        let mut inner = Inner {
            wal,
            state: LotState::new(spots),
        };
        {
            let _guard = LockGuard::shared(&lock, &lock_path)?;
            inner.catch_up(false)?;
        }

        info!(
            dir = %dir.display(),
            spots = inner.state.ledger().len(),
            occupied = inner.state.ledger().occupied_count(),
            sessions = inner.state.journal().sessions().len(),
            next_sequence = inner.wal.next_sequence(),
            writer_id = %writer_id,
            "opened lot store"
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            lock_path,
            lock,
            inner: Mutex::new(inner),
        })
    }

    /// Run a check-then-act transaction
    ///
    /// `decide` sees state that includes every write from every process and
    /// returns a value plus an optional operation to commit. No other writer
    /// can interleave between the decision and the append. Errors from
    /// `decide` abort without writing.
    pub fn transact<T, E>(
        &self,
        decide: impl FnOnce(&LotState) -> Result<(T, Option<Operation>), E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = LockGuard::exclusive(&self.lock, &self.lock_path)?;
        inner.catch_up(true)?;

        let (value, op) = decide(&inner.state)?;
        if let Some(op) = op {
            inner.state.check(&op).map_err(StoreError::from)?;
            let entry = inner.wal.append(op).map_err(StoreError::from)?;
            debug!(
                sequence = entry.sequence,
                op = entry.operation.name(),
                "committed"
            );
            inner
                .state
                .apply(&entry.operation)
                .map_err(StoreError::from)?;
        }
        Ok(value)
    }

    /// Run a read-only projection over up-to-date state
    pub fn read<T>(&self, project: impl FnOnce(&LotState) -> T) -> Result<T, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = LockGuard::shared(&self.lock, &self.lock_path)?;
        inner.catch_up(false)?;
        Ok(project(&inner.state))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
