// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{BakeRequest, CloudProvider};

/// Proptest strategies for request values.
pub mod strategies {
    use crate::{BakeRequest, CloudProvider};
    use proptest::prelude::*;

    pub fn arb_provider() -> impl Strategy<Value = CloudProvider> {
        proptest::sample::select(CloudProvider::ALL.to_vec())
    }

    pub fn arb_packages() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z][a-z0-9-]{0,8}", 0..5)
    }

    pub fn arb_request() -> impl Strategy<Value = BakeRequest> {
        (
            proptest::option::of(arb_provider()),
            arb_packages(),
            proptest::option::of("[a-z]{3,8}"),
            any::<bool>(),
        )
            .prop_map(|(provider, packages, base_os, upgrade)| BakeRequest {
                cloud_provider_type: provider,
                package_name: Some(packages.join(" ")),
                base_os,
                upgrade,
                ..BakeRequest::default()
            })
    }
}

/// A minimal request for `provider` installing `packages`
pub fn request(provider: CloudProvider, packages: &str) -> BakeRequest {
    BakeRequest::new()
        .cloud_provider_type(provider)
        .package_name(packages)
        .base_os("xenial")
        .base_label("release")
}
