// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod bake;
pub mod config;
pub mod plan;

use crate::exit_error::{ExitError, EXIT_UNKNOWN_PROVIDER};
use crate::settings::Settings;
use clap::Args;
use kiln_adapters::LocalJobRunner;
use kiln_core::{BakeRequest, CloudProvider, SystemClock};
use kiln_engine::{Bakery, HandlerRegistry, Orchestrator, StatusPoller};
use kiln_storage::MemoryBakeStore;

pub type LocalBakery = Bakery<LocalJobRunner, MemoryBakeStore, MemoryBakeStore>;

/// Fields of the bake request
#[derive(Args, Debug, Default)]
pub struct RequestArgs {
    /// Cloud provider (defaults to the configured provider)
    #[arg(long)]
    pub provider: Option<String>,

    /// Package to install (repeatable)
    #[arg(long = "package", value_name = "NAME")]
    pub packages: Vec<String>,

    #[arg(long)]
    pub base_os: Option<String>,

    #[arg(long)]
    pub base_label: Option<String>,

    #[arg(long)]
    pub base_ami: Option<String>,

    #[arg(long)]
    pub vm_type: Option<String>,

    #[arg(long)]
    pub store_type: Option<String>,

    #[arg(long)]
    pub enhanced_networking: bool,

    #[arg(long)]
    pub ami_name: Option<String>,

    #[arg(long)]
    pub ami_suffix: Option<String>,

    /// Upgrade installed packages before baking
    #[arg(long)]
    pub upgrade: bool,

    /// Template file name inside the template directory
    #[arg(long)]
    pub template: Option<String>,

    /// Extended attribute (repeatable: --attr key=value)
    #[arg(long = "attr", value_parser = parse_key_value)]
    pub attrs: Vec<(String, String)>,

    /// Requesting user
    #[arg(long)]
    pub user: Option<String>,
}

impl RequestArgs {
    pub fn to_request(&self) -> Result<BakeRequest, ExitError> {
        let provider = self
            .provider
            .as_deref()
            .map(str::parse::<CloudProvider>)
            .transpose()
            .map_err(|e| ExitError::new(EXIT_UNKNOWN_PROVIDER, e.to_string()))?;

        Ok(BakeRequest {
            user: self.user.clone(),
            package_name: (!self.packages.is_empty()).then(|| self.packages.join(" ")),
            cloud_provider_type: provider,
            base_os: self.base_os.clone(),
            base_label: self.base_label.clone(),
            base_ami: self.base_ami.clone(),
            vm_type: self.vm_type.clone(),
            store_type: self.store_type.clone(),
            enhanced_networking: self.enhanced_networking,
            ami_name: self.ami_name.clone(),
            ami_suffix: self.ami_suffix.clone(),
            upgrade: self.upgrade,
            template_file_name: self.template.clone(),
            extended_attributes: self.attrs.iter().cloned().collect(),
            ..BakeRequest::default()
        })
    }
}

pub(crate) fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) =
        s.split_once('=').ok_or_else(|| format!("invalid input format '{s}': must be key=value"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Bakery running jobs as local processes against an in-memory store
pub fn local_bakery(
    settings: &Settings,
) -> (LocalBakery, StatusPoller<LocalJobRunner, MemoryBakeStore>) {
    let runner = LocalJobRunner::new();
    let store = MemoryBakeStore::with_clock(SystemClock, settings.lock_ttl());
    let packer = &settings.packer;
    let handlers = HandlerRegistry::with_packer_defaults(&packer.binary, &packer.template_dir);
    let config = settings.bakery_config();
    let poller = StatusPoller::new(
        runner.clone(),
        store.clone(),
        handlers.clone(),
        config.status_poll_interval,
    );
    let bakery = Bakery::new(Orchestrator::new(runner, store.clone(), store, config), handlers);
    (bakery, poller)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
