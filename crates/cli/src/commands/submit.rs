// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lot submit <json>` - run a request given as a JSON document
//!
//! ```text
//! lot submit '{"op": "park", "parking_spot": "A01", "license_plate": "AB-123-C", "length_of_stay": "2.30"}'
//! ```

use anyhow::{Context as _, Result};
use clap::Args;
use lot_core::Request;
use std::io::Read;

use super::park::{LeaveArgs, ParkArgs};
use super::{park, query, Context};

#[derive(Args)]
pub struct SubmitArgs {
    /// Request body, or `-` to read it from stdin
    pub request: String,
}

pub fn submit(ctx: &Context, args: SubmitArgs) -> Result<()> {
    let body = if args.request == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("failed to read request from stdin")?;
        body
    } else {
        args.request
    };

    match Request::from_json(&body)? {
        Request::Park {
            spot,
            plate,
            length_of_stay,
        } => park::park(
            ctx,
            ParkArgs {
                spot,
                plate,
                length_of_stay,
            },
        ),
        Request::Leave { plate } => park::leave(ctx, LeaveArgs { plate }),
        Request::Locate { plate } => query::locate(ctx, &plate),
        Request::VacantSpots => query::vacant(ctx),
        Request::VacantCount => query::count(ctx),
        Request::Occupied => query::occupied(ctx),
        Request::NextAvailable => query::next(ctx),
    }
}
