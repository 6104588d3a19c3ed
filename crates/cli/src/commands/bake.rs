// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kiln bake` - run the create protocol for one request

use anyhow::Result;
use clap::Args;
use kiln_core::BakeResult;

use super::{local_bakery, RequestArgs};
use crate::exit_error::{ExitError, EXIT_LAUNCH_FAILURE};
use crate::output::{print_report, BakeReport, OutputFormat};
use crate::settings::Settings;

#[derive(Args, Debug)]
pub struct BakeArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Target region (defaults to the configured region)
    #[arg(long)]
    pub region: Option<String>,

    /// Launch a new bake even if one exists for the same key
    #[arg(long)]
    pub rebake: bool,

    /// Poll until the bake finishes, then print its logs and artifacts
    #[arg(long)]
    pub wait: bool,

    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub async fn handle(args: BakeArgs, settings: &Settings) -> Result<()> {
    let request = args.request.to_request()?;
    let region = args.region.as_deref().unwrap_or(&settings.region);
    let (bakery, poller) = local_bakery(settings);

    let plan = bakery.plan(region, &request).map_err(ExitError::from)?;
    let mut status =
        bakery.create_bake(region, &request, args.rebake).await.map_err(ExitError::from)?;
    tracing::debug!(key = %plan.key, id = %status.id, "bake created");

    if args.wait && !status.is_terminal() {
        status = poller.wait_until_terminal(&status.id).await.map_err(ExitError::from)?;
    }

    let (logs, bake) = if status.is_terminal() {
        (
            bakery.lookup_logs(&status.id).await.ok().map(|l| l.logs_content),
            bakery.lookup_bake(&status.id).await.ok(),
        )
    } else {
        (None, None)
    };

    let result = status.result;
    let id = status.id.clone();
    print_report(&BakeReport { key: plan.key.to_string(), status, logs, bake }, args.output)?;

    match result {
        Some(BakeResult::Success) | None => Ok(()),
        Some(other) => {
            let message = format!("bake {id} finished with {other}");
            Err(ExitError::new(EXIT_LAUNCH_FAILURE, message).into())
        }
    }
}
