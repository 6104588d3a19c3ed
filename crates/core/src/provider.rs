// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cloud provider types a bake can target.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Provider type named by a bake request.
///
/// Knowing a provider by name does not imply a handler is registered for it;
/// that check happens when the bakery resolves the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Docker,
    Gce,
    Huaweicloud,
    Oracle,
    Tencentcloud,
    Alicloud,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 8] = [
        CloudProvider::Aws,
        CloudProvider::Azure,
        CloudProvider::Docker,
        CloudProvider::Gce,
        CloudProvider::Huaweicloud,
        CloudProvider::Oracle,
        CloudProvider::Tencentcloud,
        CloudProvider::Alicloud,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Docker => "docker",
            CloudProvider::Gce => "gce",
            CloudProvider::Huaweicloud => "huaweicloud",
            CloudProvider::Oracle => "oracle",
            CloudProvider::Tencentcloud => "tencentcloud",
            CloudProvider::Alicloud => "alicloud",
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cloud provider: {0}")]
pub struct UnknownProviderName(pub String);

impl FromStr for CloudProvider {
    type Err = UnknownProviderName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CloudProvider::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| UnknownProviderName(s.to_string()))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
