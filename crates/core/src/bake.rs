// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bake detail records kept alongside a status.

use crate::id::JobId;
use crate::provider::CloudProvider;
use serde::{Deserialize, Serialize};

/// Artifact produced by a bake (e.g. a machine image)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeArtifact {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// What a finished bake produced, addressed by its status id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bake {
    pub id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ami: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<BakeArtifact>,
}

impl Bake {
    pub fn new(id: JobId) -> Self {
        Self { id, ami: None, image_name: None, artifacts: Vec::new() }
    }
}

/// Log output of a bake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeLogs {
    pub logs_content: String,
}

/// Where a bake was requested, recorded with its first status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeOrigin {
    pub region: String,
    pub provider: Option<CloudProvider>,
}
