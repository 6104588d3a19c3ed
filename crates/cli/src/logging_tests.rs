// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn flag_wins_over_env() {
    std::env::set_var("KILN_LOG", "warn");
    assert_eq!(filter_directives(Some("debug")), "debug");
    std::env::remove_var("KILN_LOG");
}

#[test]
#[serial]
fn env_is_used_without_flag() {
    std::env::set_var("KILN_LOG", "kiln_engine=debug");
    assert_eq!(filter_directives(None), "kiln_engine=debug");
    std::env::remove_var("KILN_LOG");
}

#[test]
#[serial]
fn defaults_to_info() {
    std::env::remove_var("KILN_LOG");
    assert_eq!(filter_directives(None), "info");
}
