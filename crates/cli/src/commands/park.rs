// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lot park` and `lot leave`

use anyhow::Result;
use clap::Args;
use lot_core::{Clock, SpotCode, SystemClock};
use serde::Serialize;
use std::fmt;

use super::Context;
use crate::output;

#[derive(Args)]
pub struct ParkArgs {
    /// Spot code (e.g., "A01")
    pub spot: String,

    /// License plate (e.g., "AB-123-C")
    pub plate: String,

    /// Length of stay as hours.minutes (e.g., "2.30")
    pub length_of_stay: String,
}

#[derive(Args)]
pub struct LeaveArgs {
    /// License plate of the departing vehicle
    pub plate: String,
}

#[derive(Serialize)]
pub struct Parked {
    pub spot: SpotCode,
}

impl fmt::Display for Parked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spot)
    }
}

#[derive(Serialize)]
pub struct Left {
    pub spot: SpotCode,
    pub message: &'static str,
}

impl fmt::Display for Left {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

pub fn park(ctx: &Context, args: ParkArgs) -> Result<()> {
    let spot = ctx.planner.park(
        &args.spot,
        &args.plate,
        &args.length_of_stay,
        SystemClock.now(),
    )?;
    output::print(&Parked { spot }, ctx.format);
    Ok(())
}

pub fn leave(ctx: &Context, args: LeaveArgs) -> Result<()> {
    let spot = ctx.planner.leave(&args.plate, SystemClock.now())?;
    output::print(
        &Left {
            spot,
            message: "Parking spot now available.",
        },
        ctx.format,
    );
    Ok(())
}
