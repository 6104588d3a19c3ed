// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_provider_is_filled_into_a_copy() {
    let original = BakeRequest::new().base_os("trusty");

    let resolved = original.with_default_provider(CloudProvider::Gce);

    assert_eq!(resolved.cloud_provider_type, Some(CloudProvider::Gce));
    assert_eq!(original.cloud_provider_type, None);
    assert_eq!(resolved.base_os, original.base_os);
}

#[test]
fn named_provider_wins_over_default() {
    let request = BakeRequest::new().cloud_provider_type(CloudProvider::Docker);

    let resolved = request.with_default_provider(CloudProvider::Aws);

    assert_eq!(resolved.cloud_provider_type, Some(CloudProvider::Docker));
    assert_eq!(resolved, request);
}

#[yare::parameterized(
    spaces     = { "nginx  redis", &["nginx", "redis"] },
    commas     = { "nginx,redis,", &["nginx", "redis"] },
    mixed      = { " a, b\tc ",    &["a", "b", "c"] },
    empty      = { "",             &[] },
)]
fn packages_split_on_whitespace_and_commas(input: &str, expected: &[&str]) {
    let request = BakeRequest::new().package_name(input);
    assert_eq!(request.packages(), expected);
}

#[test]
fn packages_empty_without_package_name() {
    assert!(BakeRequest::new().packages().is_empty());
}

#[test]
fn deserializes_sparse_json() {
    let json = r#"{"package_name":"kato","base_os":"xenial","cloud_provider_type":"aws","upgrade":true}"#;
    let request: BakeRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.packages(), vec!["kato"]);
    assert_eq!(request.cloud_provider_type, Some(CloudProvider::Aws));
    assert!(request.upgrade);
    assert!(!request.enhanced_networking);
    assert!(request.extended_attributes.is_empty());
}

#[test]
fn attribute_accumulates() {
    let request = BakeRequest::new().attribute("b", "2").attribute("a", "1");
    let keys: Vec<_> = request.extended_attributes.keys().cloned().collect();
    assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
}
