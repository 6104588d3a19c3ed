// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bake status: the canonical record of one bake attempt.

use crate::id::JobId;
use serde::{Deserialize, Serialize};

/// Lifecycle of a bake attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BakeState {
    Running,
    Completed,
}

crate::simple_display! {
    BakeState {
        Running => "RUNNING",
        Completed => "COMPLETED",
    }
}

/// Outcome of a completed bake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BakeResult {
    Success,
    Failure,
    Cancelled,
}

crate::simple_display! {
    BakeResult {
        Success => "SUCCESS",
        Failure => "FAILURE",
        Cancelled => "CANCELLED",
    }
}

/// Progress or outcome of a bake.
///
/// Once `state` is [`BakeState::Completed`] the record is terminal and stores
/// refuse to rewrite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeStatus {
    pub id: JobId,
    pub state: BakeState,
    /// Only meaningful once `state` is `Completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<BakeResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_content: Option<String>,
    pub created_timestamp: u64,
    pub updated_timestamp: u64,
}

impl BakeStatus {
    /// A freshly started bake
    pub fn running(id: JobId, now_ms: u64) -> Self {
        Self {
            id,
            state: BakeState::Running,
            result: None,
            logs_content: None,
            created_timestamp: now_ms,
            updated_timestamp: now_ms,
        }
    }

    /// A bake that finished with `result`
    pub fn completed(id: JobId, result: BakeResult, now_ms: u64) -> Self {
        Self { state: BakeState::Completed, result: Some(result), ..Self::running(id, now_ms) }
    }

    pub fn with_logs(mut self, logs: impl Into<String>) -> Self {
        self.logs_content = Some(logs.into());
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.state == BakeState::Completed
    }

    pub fn is_running(&self) -> bool {
        self.state == BakeState::Running
    }

    /// In-flight work to join, or a successful artifact to reuse.
    ///
    /// Failed and cancelled bakes are not reusable: a new request for the same
    /// key proceeds to launch.
    pub fn is_reusable(&self) -> bool {
        match self.state {
            BakeState::Running => true,
            BakeState::Completed => self.result == Some(BakeResult::Success),
        }
    }

    /// Completed with failure and carrying diagnostic output
    pub fn is_concrete_failure(&self) -> bool {
        self.is_terminal()
            && self.result == Some(BakeResult::Failure)
            && self.logs_content.as_deref().is_some_and(|logs| !logs.trim().is_empty())
    }

    /// Terminal copy of this status marked cancelled
    pub fn cancelled(&self, now_ms: u64) -> Self {
        Self {
            state: BakeState::Completed,
            result: Some(BakeResult::Cancelled),
            updated_timestamp: now_ms,
            ..self.clone()
        }
    }
}

crate::builder! {
    pub struct BakeStatusBuilder => BakeStatus {
        into {
            id: JobId = JobId::new(),
        }
        set {
            state: BakeState = BakeState::Running,
            created_timestamp: u64 = 1_000_000,
            updated_timestamp: u64 = 1_000_000,
        }
        option {
            result: BakeResult = None,
            logs_content: String = None,
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
