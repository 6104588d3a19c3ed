// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable in-memory job runner for tests.

use super::{JobRunner, RunnerError};
use async_trait::async_trait;
use kiln_core::{BakeResult, BakeStatus, Clock, JobCommand, JobId, SystemClock};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Recorded runner call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerCall {
    Start { id: JobId, command: JobCommand },
    Refresh { id: JobId },
    Cancel { id: JobId },
    Reap { id: JobId },
}

/// Outcome the next started job reports on its first refresh
#[derive(Debug, Clone)]
enum Script {
    FailWithLogs(String),
    FailSilently,
}

#[derive(Default)]
struct FakeRunnerState {
    jobs: HashMap<JobId, BakeStatus>,
    started: Vec<JobId>,
    calls: Vec<RunnerCall>,
    scripts: VecDeque<Script>,
    spawn_error: Option<String>,
}

/// Fake job runner: jobs run until a test completes or cancels them
#[derive(Clone, Default)]
pub struct FakeJobRunner {
    inner: Arc<Mutex<FakeRunnerState>>,
}

impl FakeJobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next started job fails immediately with `logs`
    pub fn fail_next_with(&self, logs: impl Into<String>) {
        self.inner.lock().scripts.push_back(Script::FailWithLogs(logs.into()));
    }

    /// The next started job fails immediately without any output
    pub fn fail_next_silently(&self) {
        self.inner.lock().scripts.push_back(Script::FailSilently);
    }

    /// Every subsequent `start` fails with `SpawnFailed(message)`
    pub fn refuse_starts(&self, message: impl Into<String>) {
        self.inner.lock().spawn_error = Some(message.into());
    }

    /// Finish a running job
    pub fn complete(&self, id: &JobId, result: BakeResult, logs: Option<&str>) {
        let mut inner = self.inner.lock();
        if let Some(status) = inner.jobs.get_mut(id) {
            let mut done = BakeStatus::completed(id.clone(), result, SystemClock.epoch_ms());
            done.created_timestamp = status.created_timestamp;
            done.logs_content = logs.map(str::to_string);
            *status = done;
        }
    }

    /// Append output to a running job
    pub fn log(&self, id: &JobId, line: &str) {
        if let Some(status) = self.inner.lock().jobs.get_mut(id) {
            let logs = status.logs_content.get_or_insert_with(String::new);
            logs.push_str(line);
            logs.push('\n');
        }
    }

    /// Forget a job, as a restarted runner would
    pub fn forget(&self, id: &JobId) {
        self.inner.lock().jobs.remove(id);
    }

    pub fn calls(&self) -> Vec<RunnerCall> {
        self.inner.lock().calls.clone()
    }

    /// Ids of every job started, in order
    pub fn started(&self) -> Vec<JobId> {
        self.inner.lock().started.clone()
    }

    /// Ids passed to `cancel`, in order
    pub fn cancelled(&self) -> Vec<JobId> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RunnerCall::Cancel { id } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Ids passed to `reap`, in order
    pub fn reaped(&self) -> Vec<JobId> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RunnerCall::Reap { id } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of jobs the runner still knows, running or finished
    pub fn job_count(&self) -> usize {
        self.inner.lock().jobs.len()
    }

    /// Ids of jobs still running
    pub fn live_jobs(&self) -> Vec<JobId> {
        let inner = self.inner.lock();
        inner
            .started
            .iter()
            .filter(|id| inner.jobs.get(*id).is_some_and(BakeStatus::is_running))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl JobRunner for FakeJobRunner {
    async fn start(&self, command: &JobCommand) -> Result<JobId, RunnerError> {
        let mut inner = self.inner.lock();
        if let Some(message) = &inner.spawn_error {
            return Err(RunnerError::SpawnFailed(message.clone()));
        }

        let id = JobId::new();
        let now = SystemClock.epoch_ms();
        let status = match inner.scripts.pop_front() {
            None => BakeStatus::running(id.clone(), now),
            Some(Script::FailWithLogs(logs)) => {
                BakeStatus::completed(id.clone(), BakeResult::Failure, now).with_logs(logs)
            }
            Some(Script::FailSilently) => {
                BakeStatus::completed(id.clone(), BakeResult::Failure, now)
            }
        };
        inner.jobs.insert(id.clone(), status);
        inner.started.push(id.clone());
        inner.calls.push(RunnerCall::Start { id: id.clone(), command: command.clone() });
        Ok(id)
    }

    async fn refresh_status(&self, id: &JobId) -> Result<BakeStatus, RunnerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(RunnerCall::Refresh { id: id.clone() });
        inner.jobs.get(id).cloned().ok_or_else(|| RunnerError::NotFound(id.clone()))
    }

    async fn cancel(&self, id: &JobId) -> Result<(), RunnerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(RunnerCall::Cancel { id: id.clone() });
        let status = inner.jobs.get_mut(id).ok_or_else(|| RunnerError::NotFound(id.clone()))?;
        if status.is_running() {
            *status = status.cancelled(SystemClock.epoch_ms());
        }
        Ok(())
    }

    async fn reap(&self, id: &JobId) -> Result<(), RunnerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(RunnerCall::Reap { id: id.clone() });
        let status = inner.jobs.get(id).ok_or_else(|| RunnerError::NotFound(id.clone()))?;
        if status.is_terminal() {
            inner.jobs.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
