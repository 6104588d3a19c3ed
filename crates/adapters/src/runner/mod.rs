// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runner adapters
//!
//! A job runner starts a bake command, reports its current status (including
//! whatever log output it has so far) and can be asked to terminate it.
//! Termination is best-effort signalling: `cancel` returns once the request is
//! delivered, not once the process is gone.
//!
//! ```text
//! start(command) ──► JobId ──► refresh_status(id) ──► BakeStatus { id, .. }
//!                                  │
//!                                  └── cancel(id)
//! ```

mod local;

pub use local::{LocalJobRunner, DEFAULT_FINISHED_RETENTION};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeJobRunner, RunnerCall};

use async_trait::async_trait;
use kiln_core::{BakeStatus, JobCommand, JobId};
use thiserror::Error;

/// Errors from job runner operations
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("spawn failed: {0}")]
    SpawnFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability to execute bake jobs
#[async_trait]
pub trait JobRunner: Send + Sync + 'static {
    /// Start `command` and return the id the job will be tracked under
    async fn start(&self, command: &JobCommand) -> Result<JobId, RunnerError>;

    /// Point-in-time status of a job; may carry partial logs while running
    async fn refresh_status(&self, id: &JobId) -> Result<BakeStatus, RunnerError>;

    /// Ask the runner to terminate a job
    async fn cancel(&self, id: &JobId) -> Result<(), RunnerError>;

    /// Forget a finished job whose final status has been recorded elsewhere.
    /// Running jobs are kept.
    async fn reap(&self, id: &JobId) -> Result<(), RunnerError>;
}
