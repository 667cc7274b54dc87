// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expiration sweeper
//!
//! Flags open sessions whose expected departure has passed. Flagging never
//! releases a spot or closes a session. A failed sweep is logged and the
//! next tick tries again.

use crate::error::ParkingError;
use chrono::{DateTime, Utc};
use lot_core::Clock;
use lot_storage::{ExpireOp, LotStore, Operation};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Periodic task that marks overdue sessions as expired
#[derive(Clone)]
pub struct Sweeper<C: Clock> {
    store: Arc<LotStore>,
    clock: C,
    interval: Duration,
}

impl<C: Clock> Sweeper<C> {
    pub fn new(store: Arc<LotStore>, clock: C, interval: Duration) -> Self {
        Self {
            store,
            clock,
            interval,
        }
    }

    /// Flag every open, unflagged session due before `now`
    ///
    /// Returns how many sessions were newly flagged.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize, ParkingError> {
        self.store.transact(|state| {
            let spots: Vec<_> = state
                .journal()
                .open_sessions_past_due(now)
                .into_iter()
                .map(|(spot, _)| spot)
                .collect();
            if spots.is_empty() {
                return Ok((0, None));
            }
            let count = spots.len();
            Ok((count, Some(Operation::Expire(ExpireOp { spots, at: now }))))
        })
    }

    /// Run one sweep at the clock's current time, logging the outcome
    pub fn tick(&self) -> Option<usize> {
        let now = self.clock.now();
        match self.sweep_expired(now) {
            Ok(0) => {
                debug!("no sessions past due");
                Some(0)
            }
            Ok(flagged) => {
                info!(flagged, "flagged expired sessions");
                Some(flagged)
            }
            Err(e) => {
                warn!(error = %e, transient = e.is_transient(), "expiration sweep failed");
                None
            }
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock + 'static> Sweeper<C> {
    /// Sweep every interval until `shutdown` turns true or its sender drops
    ///
    /// The first sweep happens one interval after start. Each sweep runs on
    /// the blocking pool since it waits on the store's file lock.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut timer = interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip initial immediate tick
        timer.tick().await;

        info!(interval = ?self.interval, "sweeper started");
        loop {
            tokio::select! {
                _ = timer.tick() => {
                    let sweeper = self.clone();
                    if let Err(e) = tokio::task::spawn_blocking(move || sweeper.tick()).await {
                        warn!(error = %e, "sweep task failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("sweeper stopped");
    }
}

#[cfg(test)]
#[path = "sweeper_tests.rs"]
mod tests;
