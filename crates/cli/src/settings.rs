// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI settings: a TOML file, then environment overrides.
//!
//! The file is `--config`, else `$KILN_CONFIG`, else
//! `<config dir>/kiln/config.toml` when it exists. Missing keys keep defaults.

use crate::exit_error::{ExitError, EXIT_UNKNOWN_PROVIDER};
use anyhow::{Context, Result};
use kiln_core::CloudProvider;
use kiln_engine::BakeryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub default_provider: CloudProvider,
    pub region: String,
    pub lock_ttl_ms: u64,
    pub fail_fast_ms: u64,
    pub poll_interval_ms: u64,
    pub wait_timeout_ms: u64,
    pub status_poll_ms: u64,
    pub packer: PackerSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackerSettings {
    pub binary: String,
    pub template_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let bakery = BakeryConfig::default();
        Self {
            default_provider: bakery.default_provider,
            region: "us-east-1".to_string(),
            lock_ttl_ms: kiln_storage::DEFAULT_LOCK_TTL.as_millis() as u64,
            fail_fast_ms: bakery.fail_fast_window.as_millis() as u64,
            poll_interval_ms: bakery.lock_poll_interval.as_millis() as u64,
            wait_timeout_ms: bakery.lock_wait_timeout.as_millis() as u64,
            status_poll_ms: bakery.status_poll_interval.as_millis() as u64,
            packer: PackerSettings::default(),
        }
    }
}

impl Default for PackerSettings {
    fn default() -> Self {
        Self { binary: "packer".to_string(), template_dir: PathBuf::from("templates") }
    }
}

impl Settings {
    /// Load from the resolved settings file, then apply env overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut settings = match resolve_path(explicit) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing settings {}", path.display()))
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(name) = crate::env::default_provider() {
            self.default_provider = name.parse().map_err(|e| {
                ExitError::new(EXIT_UNKNOWN_PROVIDER, format!("KILN_DEFAULT_PROVIDER: {e}"))
            })?;
        }
        if let Some(region) = crate::env::region() {
            self.region = region;
        }
        if let Some(binary) = crate::env::packer_binary() {
            self.packer.binary = binary;
        }
        if let Some(dir) = crate::env::template_dir() {
            self.packer.template_dir = dir;
        }
        Ok(())
    }

    pub fn bakery_config(&self) -> BakeryConfig {
        BakeryConfig::default()
            .default_provider(self.default_provider)
            .fail_fast_window(Duration::from_millis(self.fail_fast_ms))
            .lock_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .lock_wait_timeout(Duration::from_millis(self.wait_timeout_ms))
            .status_poll_interval(Duration::from_millis(self.status_poll_ms))
    }

    pub fn lock_ttl(&self) -> Duration {
        Duration::from_millis(self.lock_ttl_ms)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Settings file to read, if any. An explicit path is returned even when
/// missing so the read reports it; the default location only when present.
fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = crate::env::config_path() {
        return Some(path);
    }
    dirs::config_dir().map(|dir| dir.join("kiln").join("config.toml")).filter(|p| p.is_file())
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
