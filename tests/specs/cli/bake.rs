// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kiln bake` specs, using stand-in programs for packer

use crate::prelude::*;

#[test]
fn bake_wait_reports_success_and_logs() {
    let settings = Settings::fast("");
    cli()
        .args(&["bake", "--wait", "--package", "nginx", "--region", "us-east-1"])
        .settings(&settings)
        .env("KILN_PACKER_BINARY", "echo")
        .passes()
        .stdout_has("COMPLETED/SUCCESS")
        .stdout_has("--- logs ---")
        .stdout_has("build -color=false -var provider=aws -var region=us-east-1");
}

#[test]
fn bake_json_output() {
    let settings = Settings::fast("");
    let run = cli()
        .args(&["bake", "--wait", "--package", "nginx", "-o", "json"])
        .settings(&settings)
        .env("KILN_PACKER_BINARY", "echo")
        .passes();

    let json = run.json();
    assert!(json["key"].as_str().unwrap().starts_with("bake:aws:us-east-1:"));
    assert_eq!(json["status"]["state"], "COMPLETED");
    assert_eq!(json["status"]["result"], "SUCCESS");
    assert!(json["logs"].as_str().unwrap().contains("package_list=nginx"));
}

#[test]
fn startup_failure_with_output_is_a_launch_failure() {
    // `sh build ...` fails at once, complaining on stderr
    let settings = Settings::fast("");
    cli()
        .args(&["bake", "--package", "nginx"])
        .settings(&settings)
        .env("KILN_PACKER_BINARY", "sh")
        .exits_with(3)
        .stderr_has("failed to launch")
        .stdout_lacks("RUNNING");
}

#[test]
fn silent_failure_is_recorded_then_reported() {
    let settings = Settings::fast("");
    cli()
        .args(&["bake", "--wait", "--package", "nginx"])
        .settings(&settings)
        .env("KILN_PACKER_BINARY", "false")
        .exits_with(3)
        .stdout_has("COMPLETED/FAILURE")
        .stderr_has("finished with FAILURE");
}

#[test]
fn missing_packer_binary_fails() {
    let settings = Settings::fast("");
    cli()
        .args(&["bake", "--package", "nginx"])
        .settings(&settings)
        .env("KILN_PACKER_BINARY", "/nonexistent/kiln/packer")
        .exits_with(1)
        .stderr_has("spawn failed");
}
