// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

#[test]
fn new_ids_carry_prefix_and_are_unique() {
    let a = JobId::new();
    let b = JobId::new();
    assert!(a.as_str().starts_with("job-"));
    assert_eq!(a.suffix().len(), 19);
    assert_ne!(a, b);
}

#[test]
fn from_string_keeps_foreign_ids_verbatim() {
    let id = JobId::from_string("packer-42");
    assert_eq!(id, "packer-42");
    assert_eq!(id.suffix(), "packer-42");
}

#[test]
fn ids_look_up_by_str() {
    let mut map = HashMap::new();
    map.insert(JobId::from("job-abc"), 7);
    assert_eq!(map.get("job-abc"), Some(&7));
}

#[test]
fn short_truncates_suffix() {
    let id = JobId::from("job-abcdefghijk");
    assert_eq!(id.short(4), "abcd");
    assert_eq!(id.short(100), "abcdefghijk");
}

#[yare::parameterized(
    longer  = { "abcdefgh", 3, "abc" },
    exact   = { "abc",      3, "abc" },
    shorter = { "ab",       3, "ab" },
    empty   = { "",         3, "" },
    multi   = { "añb",      2, "añ" },
)]
fn short_on_str(input: &str, n: usize, expected: &str) {
    assert_eq!(short(input, n), expected);
}

#[test]
fn serializes_transparently() {
    let id = JobId::from("job-xyz");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"job-xyz\"");
}
