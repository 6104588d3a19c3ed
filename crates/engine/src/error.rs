// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use kiln_adapters::RunnerError;
use kiln_core::{BakeKey, JobId};
use kiln_storage::StoreError;
use thiserror::Error;

/// Errors surfaced by bakery operations
#[derive(Debug, Error)]
pub enum BakeryError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("unknown cloud provider: {0}")]
    UnknownProvider(String),

    /// The fail-fast probe saw the job fail with diagnostic output
    #[error("bake {id} failed to launch:\n{logs}")]
    LaunchFailure { id: JobId, logs: String },

    #[error("unable to acquire lock for {key} or determine its current holder")]
    LockContentionTimeout { key: BakeKey },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("runner error: {0}")]
    Runner(#[from] RunnerError),
}

impl BakeryError {
    pub(crate) fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{what} {id}"))
    }
}
