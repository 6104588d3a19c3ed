// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kiln plan` specs

use crate::prelude::*;

#[test]
fn plan_prints_key_and_command() {
    cli()
        .args(&["plan", "--region", "us-west-2", "--package", "nginx", "--package", "curl"])
        .args(&["--base-os", "xenial"])
        .passes()
        .stdout_has("key: bake:aws:us-west-2:xenial:")
        .stdout_has(":curl,nginx:")
        .stdout_has("command: packer build -color=false")
        .stdout_has("templates/aws.json");
}

#[test]
fn package_order_does_not_change_the_key() {
    let key = |packages: &[&str]| {
        let mut args = vec!["plan", "-o", "json"];
        for package in packages {
            args.extend(["--package", *package]);
        }
        cli().args(&args).passes().json()["key"].as_str().unwrap().to_string()
    };
    assert_eq!(key(&["nginx", "curl"]), key(&["curl", "nginx"]));
}

#[test]
fn default_provider_comes_from_env() {
    cli()
        .args(&["plan", "--package", "nginx"])
        .env("KILN_DEFAULT_PROVIDER", "docker")
        .env("KILN_TEMPLATE_DIR", "/srv/kiln")
        .passes()
        .stdout_has("key: bake:docker:")
        .stdout_has("/srv/kiln/docker.json");
}

#[test]
fn unknown_provider_exits_2() {
    cli()
        .args(&["plan", "--provider", "vmware"])
        .exits_with(2)
        .stderr_has("unknown cloud provider: vmware");
}
