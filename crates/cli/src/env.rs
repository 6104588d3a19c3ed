// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Settings file override (`KILN_CONFIG`)
pub fn config_path() -> Option<PathBuf> {
    non_empty("KILN_CONFIG").map(PathBuf::from)
}

/// Log filter directives (`KILN_LOG`), e.g. `debug` or `kiln_engine=debug`
pub fn log_filter() -> Option<String> {
    non_empty("KILN_LOG")
}

pub fn default_provider() -> Option<String> {
    non_empty("KILN_DEFAULT_PROVIDER")
}

pub fn region() -> Option<String> {
    non_empty("KILN_REGION")
}

pub fn packer_binary() -> Option<String> {
    non_empty("KILN_PACKER_BINARY")
}

pub fn template_dir() -> Option<PathBuf> {
    non_empty("KILN_TEMPLATE_DIR").map(PathBuf::from)
}
