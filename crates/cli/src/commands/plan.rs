// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kiln plan` - show the key and command a request resolves to

use anyhow::Result;
use clap::Args;

use super::{local_bakery, RequestArgs};
use crate::exit_error::ExitError;
use crate::output::{print_plan, OutputFormat};
use crate::settings::Settings;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Target region (defaults to the configured region)
    #[arg(long)]
    pub region: Option<String>,

    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub fn handle(args: PlanArgs, settings: &Settings) -> Result<()> {
    let request = args.request.to_request()?;
    let region = args.region.as_deref().unwrap_or(&settings.region);
    let (bakery, _) = local_bakery(settings);
    let plan = bakery.plan(region, &request).map_err(ExitError::from)?;
    print_plan(&plan, args.output)
}
