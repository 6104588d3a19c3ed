// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bake request: the immutable description of what to build.

use crate::provider::CloudProvider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Description of the image a client wants baked.
///
/// Requests are values. Filling in defaults goes through
/// [`BakeRequest::with_default_provider`], which returns a new request so a
/// shared request is never mutated while its key is being derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeRequest {
    pub user: Option<String>,
    /// Packages to install, separated by whitespace or commas
    pub package_name: Option<String>,
    pub build_host: Option<String>,
    pub job: Option<String>,
    pub build_number: Option<String>,
    pub commit_hash: Option<String>,
    pub build_info_url: Option<String>,
    pub cloud_provider_type: Option<CloudProvider>,
    pub base_os: Option<String>,
    pub base_name: Option<String>,
    pub base_label: Option<String>,
    pub base_ami: Option<String>,
    pub vm_type: Option<String>,
    pub store_type: Option<String>,
    pub enhanced_networking: bool,
    pub ami_name: Option<String>,
    pub ami_suffix: Option<String>,
    pub upgrade: bool,
    pub os_type: Option<String>,
    pub package_type: Option<String>,
    pub template_file_name: Option<String>,
    pub extended_attributes: BTreeMap<String, String>,
}

impl BakeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        set {
            enhanced_networking: bool,
            upgrade: bool,
            extended_attributes: BTreeMap<String, String>,
        }
        option {
            user: String,
            package_name: String,
            build_host: String,
            job: String,
            build_number: String,
            commit_hash: String,
            build_info_url: String,
            cloud_provider_type: CloudProvider,
            base_os: String,
            base_name: String,
            base_label: String,
            base_ami: String,
            vm_type: String,
            store_type: String,
            ami_name: String,
            ami_suffix: String,
            os_type: String,
            package_type: String,
            template_file_name: String,
        }
    }

    /// Add a single extended attribute
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extended_attributes.insert(key.into(), value.into());
        self
    }

    /// Copy of this request with `provider` filled in when none was named.
    pub fn with_default_provider(&self, provider: CloudProvider) -> BakeRequest {
        let mut resolved = self.clone();
        resolved.cloud_provider_type.get_or_insert(provider);
        resolved
    }

    /// Package names in request order, with empty entries dropped
    pub fn packages(&self) -> Vec<&str> {
        self.package_name
            .as_deref()
            .unwrap_or_default()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
