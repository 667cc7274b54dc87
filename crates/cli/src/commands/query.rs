// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only lot queries

use anyhow::Result;
use clap::Args;
use lot_core::{Clock, Plate, SpotCode, SystemClock};
use serde::Serialize;
use std::fmt;

use super::Context;
use crate::output;

#[derive(Args)]
pub struct LocateArgs {
    /// License plate to look up
    pub plate: String,
}

#[derive(Serialize)]
struct Located {
    spot: SpotCode,
}

impl fmt::Display for Located {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spot)
    }
}

#[derive(Serialize)]
struct VacantCount {
    vacant: usize,
}

impl fmt::Display for VacantCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vacant)
    }
}

#[derive(Serialize)]
struct OccupiedSpot {
    spot: SpotCode,
    plate: Plate,
}

impl fmt::Display for OccupiedSpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<5} {}", self.spot, self.plate)
    }
}

#[derive(Serialize)]
struct NextAvailable {
    spot: SpotCode,
}

impl fmt::Display for NextAvailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spot)
    }
}

pub fn locate(ctx: &Context, plate: &str) -> Result<()> {
    let spot = ctx.planner.plate_location(plate)?;
    output::print(&Located { spot }, ctx.format);
    Ok(())
}

pub fn vacant(ctx: &Context) -> Result<()> {
    let spots = ctx.planner.vacant_spots()?;
    output::print_list(&spots, ctx.format);
    Ok(())
}

pub fn count(ctx: &Context) -> Result<()> {
    let vacant = ctx.planner.vacant_count()?;
    output::print(&VacantCount { vacant }, ctx.format);
    Ok(())
}

pub fn occupied(ctx: &Context) -> Result<()> {
    let spots: Vec<OccupiedSpot> = ctx
        .planner
        .occupied()?
        .into_iter()
        .map(|(spot, plate)| OccupiedSpot { spot, plate })
        .collect();
    output::print_list(&spots, ctx.format);
    Ok(())
}

pub fn next(ctx: &Context) -> Result<()> {
    let spot = ctx.planner.next_available_spot(SystemClock.now())?;
    output::print(&NextAvailable { spot }, ctx.format);
    Ok(())
}
