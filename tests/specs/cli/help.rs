// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("plan")
        .stdout_has("bake")
        .stdout_has("config");
}

#[test]
fn no_args_is_a_usage_error() {
    cli().exits_with(2).stderr_has("Usage:");
}

#[test]
fn bake_help_shows_flags() {
    cli()
        .args(&["bake", "--help"])
        .passes()
        .stdout_has("--rebake")
        .stdout_has("--wait")
        .stdout_has("--package")
        .stdout_has("--attr");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
