// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lot sweep` - one expiration pass without the daemon

use anyhow::Result;
use lot_core::{Clock, SystemClock};
use lot_engine::Sweeper;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::Context;
use crate::output;

#[derive(Serialize)]
struct Swept {
    flagged: usize,
}

impl fmt::Display for Swept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flagged {
            0 => write!(f, "No overdue sessions"),
            1 => write!(f, "Flagged 1 overdue session"),
            n => write!(f, "Flagged {} overdue sessions", n),
        }
    }
}

pub fn sweep(ctx: &Context) -> Result<()> {
    let sweeper = Sweeper::new(
        Arc::clone(ctx.planner.store()),
        SystemClock,
        ctx.config.sweep_interval,
    );
    let flagged = sweeper.sweep_expired(sweeper.clock().now())?;
    output::print(&Swept { flagged }, ctx.format);
    Ok(())
}
