// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs bake commands as local subprocesses.

use super::{JobRunner, RunnerError};
use async_trait::async_trait;
use kiln_core::{BakeResult, BakeState, BakeStatus, Clock, JobCommand, JobId, SystemClock};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How long to keep draining output after the process has exited
const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Finished jobs kept for late refreshes before the oldest are dropped
pub const DEFAULT_FINISHED_RETENTION: usize = 256;

#[derive(Debug)]
struct JobRecord {
    logs: String,
    outcome: Option<BakeResult>,
    created_ms: u64,
    updated_ms: u64,
}

struct LocalJob {
    record: Arc<Mutex<JobRecord>>,
    cancel: CancellationToken,
}

/// Job runner backed by `tokio::process`.
///
/// stdout and stderr are merged line by line into one log buffer per job.
/// Finished jobs stay until reaped; past the retention limit the oldest
/// finished ones are dropped when a new job starts.
#[derive(Clone)]
pub struct LocalJobRunner<C: Clock = SystemClock> {
    jobs: Arc<Mutex<HashMap<JobId, LocalJob>>>,
    clock: C,
    finished_retention: usize,
}

impl LocalJobRunner<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for LocalJobRunner<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> LocalJobRunner<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(HashMap::new())),
            clock,
            finished_retention: DEFAULT_FINISHED_RETENTION,
        }
    }

    kiln_core::setters! {
        set {
            finished_retention: usize,
        }
    }

    /// Number of jobs this runner is tracking (running or finished)
    pub fn job_count(&self) -> usize {
        self.jobs.lock().len()
    }
}

#[async_trait]
impl<C: Clock> JobRunner for LocalJobRunner<C> {
    async fn start(&self, command: &JobCommand) -> Result<JobId, RunnerError> {
        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for (key, value) in &command.env {
            cmd.env(key, value);
        }
        if let Some(cwd) = &command.cwd {
            cmd.current_dir(cwd);
        }

        let child = cmd
            .spawn()
            .map_err(|e| RunnerError::SpawnFailed(format!("{}: {}", command.program, e)))?;

        let id = JobId::new();
        let now = self.clock.epoch_ms();
        let record = Arc::new(Mutex::new(JobRecord {
            logs: String::new(),
            outcome: None,
            created_ms: now,
            updated_ms: now,
        }));
        let cancel = CancellationToken::new();
        tracing::info!(%id, command = %command.display(), "started bake job");

        tokio::spawn(supervise(
            id.clone(),
            child,
            Arc::clone(&record),
            cancel.clone(),
            self.clock.clone(),
        ));
        let mut jobs = self.jobs.lock();
        evict_finished(&mut jobs, self.finished_retention);
        jobs.insert(id.clone(), LocalJob { record, cancel });
        Ok(id)
    }

    async fn refresh_status(&self, id: &JobId) -> Result<BakeStatus, RunnerError> {
        let jobs = self.jobs.lock();
        let job = jobs.get(id).ok_or_else(|| RunnerError::NotFound(id.clone()))?;
        let record = job.record.lock();
        Ok(BakeStatus {
            id: id.clone(),
            state: if record.outcome.is_some() { BakeState::Completed } else { BakeState::Running },
            result: record.outcome,
            logs_content: (!record.logs.is_empty()).then(|| record.logs.clone()),
            created_timestamp: record.created_ms,
            updated_timestamp: record.updated_ms,
        })
    }

    async fn cancel(&self, id: &JobId) -> Result<(), RunnerError> {
        let jobs = self.jobs.lock();
        let job = jobs.get(id).ok_or_else(|| RunnerError::NotFound(id.clone()))?;
        job.cancel.cancel();
        Ok(())
    }

    async fn reap(&self, id: &JobId) -> Result<(), RunnerError> {
        let mut jobs = self.jobs.lock();
        let job = jobs.get(id).ok_or_else(|| RunnerError::NotFound(id.clone()))?;
        let finished = job.record.lock().outcome.is_some();
        if finished {
            jobs.remove(id);
        }
        Ok(())
    }
}

/// Drop the oldest finished jobs beyond `keep`
fn evict_finished(jobs: &mut HashMap<JobId, LocalJob>, keep: usize) {
    let mut finished: Vec<(u64, JobId)> = jobs
        .iter()
        .filter_map(|(id, job)| {
            let record = job.record.lock();
            record.outcome.is_some().then(|| (record.updated_ms, id.clone()))
        })
        .collect();
    if finished.len() <= keep {
        return;
    }
    finished.sort();
    let excess = finished.len() - keep;
    for (_, id) in finished.into_iter().take(excess) {
        tracing::debug!(%id, "dropping finished job record");
        jobs.remove(&id);
    }
}

/// Map a process exit code to a bake result; no code means killed by a signal
fn exit_result(code: Option<i32>) -> BakeResult {
    match code {
        Some(0) => BakeResult::Success,
        _ => BakeResult::Failure,
    }
}

/// Collect output and wait for exit (or cancellation) of one job
async fn supervise<C: Clock>(
    id: JobId,
    mut child: Child,
    record: Arc<Mutex<JobRecord>>,
    cancel: CancellationToken,
    clock: C,
) {
    let readers = [
        child.stdout.take().map(|out| spawn_collector(out, &record, &clock)),
        child.stderr.take().map(|err| spawn_collector(err, &record, &clock)),
    ];

    let outcome = tokio::select! {
        status = child.wait() => match status {
            Ok(status) => {
                let result = exit_result(status.code());
                if result != BakeResult::Success {
                    tracing::info!(%id, code = ?status.code(), "bake job failed");
                }
                result
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "failed waiting on bake job");
                append(&record, &clock, &format!("failed waiting on job: {e}"));
                BakeResult::Failure
            }
        },
        _ = cancel.cancelled() => {
            tracing::info!(%id, "cancelling bake job");
            if let Err(e) = child.kill().await {
                tracing::warn!(%id, error = %e, "failed to kill bake job");
            }
            BakeResult::Cancelled
        }
    };

    for reader in readers.into_iter().flatten() {
        if tokio::time::timeout(OUTPUT_DRAIN_TIMEOUT, reader).await.is_err() {
            tracing::debug!(%id, "output still open after exit, not waiting further");
        }
    }

    let mut record = record.lock();
    record.outcome = Some(outcome);
    record.updated_ms = clock.epoch_ms();
}

fn spawn_collector<R, C>(stream: R, record: &Arc<Mutex<JobRecord>>, clock: &C) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    C: Clock,
{
    tokio::spawn(collect(stream, Arc::clone(record), clock.clone()))
}

async fn collect<R, C>(stream: R, record: Arc<Mutex<JobRecord>>, clock: C)
where
    R: AsyncRead + Unpin,
    C: Clock,
{
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        append(&record, &clock, &line);
    }
}

fn append<C: Clock>(record: &Mutex<JobRecord>, clock: &C, line: &str) {
    let mut record = record.lock();
    record.logs.push_str(line);
    record.logs.push('\n');
    record.updated_ms = clock.epoch_ms();
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
