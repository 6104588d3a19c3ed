// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kiln config` specs

use crate::prelude::*;

#[test]
fn defaults_are_printed_as_toml() {
    cli()
        .args(&["config"])
        .passes()
        .stdout_has("default_provider = \"aws\"")
        .stdout_has("lock_ttl_ms = 10000")
        .stdout_has("[packer]")
        .stdout_has("binary = \"packer\"");
}

#[test]
fn settings_file_and_env_are_merged() {
    let settings = Settings::fast("region = \"eu-west-1\"\n");
    cli()
        .args(&["config"])
        .settings(&settings)
        .env("KILN_PACKER_BINARY", "/opt/packer/bin/packer")
        .passes()
        .stdout_has("region = \"eu-west-1\"")
        .stdout_has("fail_fast_ms = 300")
        .stdout_has("binary = \"/opt/packer/bin/packer\"");
}

#[test]
fn config_env_var_locates_settings() {
    let settings = Settings::fast("");
    cli()
        .args(&["config"])
        .env("KILN_CONFIG", settings.path().display().to_string())
        .passes()
        .stdout_has("status_poll_ms = 20");
}

#[test]
fn malformed_settings_fail() {
    let settings = Settings::fast("lock_ttl = \"soon\"\n");
    cli().args(&["config"]).settings(&settings).exits_with(1).stderr_has("parsing settings");
}
