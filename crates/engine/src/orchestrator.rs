// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bake creation protocol.
//!
//! Concurrent requests for one [`BakeKey`] converge on a single job:
//!
//! 1. A reusable status already stored under the key (running, or completed
//!    successfully) is returned as is.
//! 2. Otherwise the key's lock decides which instance attempts a launch.
//!    The holder starts the job, probes it once after the fail-fast window,
//!    then records its status with the store's atomic `store_new_status`.
//!    If another attempt's status won that write, the local job is cancelled
//!    and the winner's status returned.
//! 3. Instances that miss the lock poll the key until a status appears. If
//!    none does before the wait timeout they retry the lock once, which
//!    succeeds when the holder died and its lock expired.

use crate::{BakeryConfig, BakeryError};
use kiln_adapters::JobRunner;
use kiln_core::{Bake, BakeKey, BakeLogs, BakeRequest, BakeStatus, JobCommand, JobId};
use kiln_storage::{BakeStore, LockService, NewBakeStatus};
use tokio::time::Instant;

/// Stateless bake coordinator; every instance sharing a store behaves as one.
pub struct Orchestrator<R, L, S> {
    runner: R,
    locks: L,
    store: S,
    config: BakeryConfig,
}

impl<R, L, S> Orchestrator<R, L, S>
where
    R: JobRunner,
    L: LockService,
    S: BakeStore,
{
    pub fn new(runner: R, locks: L, store: S, config: BakeryConfig) -> Self {
        Self { runner, locks, store, config }
    }

    pub fn config(&self) -> &BakeryConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the status of the one bake that serves `key`, launching it if needed.
    ///
    /// With `rebake`, any status stored under the key is dropped first so a new
    /// job is always attempted.
    pub async fn create_bake(
        &self,
        key: &BakeKey,
        region: &str,
        request: &BakeRequest,
        command: &JobCommand,
        rebake: bool,
    ) -> Result<BakeStatus, BakeryError> {
        let stale = if rebake {
            if self.store.delete_by_key(key).await? {
                tracing::info!(%key, "rebake requested, dropped stored status");
            }
            None
        } else {
            match self.store.get_status_by_key(key).await? {
                Some(status) if status.is_reusable() => {
                    tracing::info!(
                        %key, id = %status.id, state = %status.state, "reusing existing bake"
                    );
                    return Ok(status);
                }
                other => other.map(|status| status.id),
            }
        };

        if self.locks.acquire_lock(key).await? {
            return self.launch(key, region, request, command).await;
        }

        tracing::info!(%key, "bake lock held elsewhere, waiting for its status");
        if let Some(status) = self.wait_for_status(key, stale.as_ref()).await? {
            return Ok(status);
        }

        if self.locks.acquire_lock(key).await? {
            tracing::info!(%key, "no status appeared and the lock expired, launching");
            return self.launch(key, region, request, command).await;
        }

        Err(BakeryError::LockContentionTimeout { key: key.clone() })
    }

    /// Poll the key until a status other than `stale` shows up or the wait
    /// timeout elapses.
    async fn wait_for_status(
        &self,
        key: &BakeKey,
        stale: Option<&JobId>,
    ) -> Result<Option<BakeStatus>, BakeryError> {
        let deadline = Instant::now() + self.config.lock_wait_timeout;
        loop {
            if let Some(status) = self.store.get_status_by_key(key).await? {
                if stale != Some(&status.id) {
                    tracing::info!(%key, id = %status.id, state = %status.state, "joined bake");
                    return Ok(Some(status));
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            tracing::debug!(%key, "no status yet");
            tokio::time::sleep(self.config.lock_poll_interval.min(deadline - now)).await;
        }
    }

    /// Start the job, probe it, and record it. Caller holds the key's lock.
    async fn launch(
        &self,
        key: &BakeKey,
        region: &str,
        request: &BakeRequest,
        command: &JobCommand,
    ) -> Result<BakeStatus, BakeryError> {
        let id = match self.runner.start(command).await {
            Ok(id) => id,
            Err(e) => {
                self.release(key).await;
                return Err(e.into());
            }
        };
        tracing::info!(%key, %id, region, command = %command.display(), "bake job started");

        tokio::time::sleep(self.config.fail_fast_window).await;

        let status = match self.runner.refresh_status(&id).await {
            Ok(status) => status,
            Err(e) => {
                self.abandon(key, &id).await;
                return Err(e.into());
            }
        };

        if status.is_concrete_failure() {
            self.release(key).await;
            self.reap(&id).await;
            let logs = status.logs_content.unwrap_or_default();
            tracing::warn!(%key, %id, "bake job failed on startup");
            return Err(BakeryError::LaunchFailure { id, logs });
        }
        if status.is_terminal() && !status.is_reusable() {
            tracing::info!(
                %key, %id, result = ?status.result, "job ended without output, recording as is"
            );
        }

        let command_line = command.display();
        let stored = self
            .store
            .store_new_status(NewBakeStatus {
                key,
                region,
                request,
                status: &status,
                command: &command_line,
            })
            .await;
        let stored = match stored {
            Ok(stored) => stored,
            Err(e) => {
                self.abandon(key, &id).await;
                return Err(e.into());
            }
        };

        if stored.id != id {
            tracing::info!(%key, %id, winner = %stored.id, "lost launch race, cancelling own job");
            if let Err(e) = self.runner.cancel(&id).await {
                tracing::warn!(%key, %id, error = %e, "failed to cancel losing job");
            }
        } else if stored.is_terminal() {
            // already final; no poller will revisit it
            self.reap(&id).await;
        }
        Ok(stored)
    }

    /// Cancel a job that never got a status recorded and free its key.
    async fn abandon(&self, key: &BakeKey, id: &JobId) {
        if let Err(e) = self.runner.cancel(id).await {
            tracing::warn!(%key, %id, error = %e, "failed to cancel unrecorded job");
        }
        self.release(key).await;
    }

    async fn reap(&self, id: &JobId) {
        if let Err(e) = self.runner.reap(id).await {
            tracing::debug!(%id, error = %e, "runner kept no record to reap");
        }
    }

    async fn release(&self, key: &BakeKey) {
        if let Err(e) = self.locks.release_lock(key).await {
            tracing::warn!(%key, error = %e, "failed to release bake lock");
        }
    }

    /// Drop whatever status is stored under `key`
    pub async fn delete_bake(&self, key: &BakeKey) -> Result<(), BakeryError> {
        if !self.store.delete_by_key(key).await? {
            return Err(BakeryError::not_found("bake for key", key));
        }
        tracing::info!(%key, "bake deleted");
        Ok(())
    }

    /// Cancel an incomplete bake and terminate its job.
    ///
    /// Unknown and already finished bakes are both `NotFound`.
    pub async fn cancel_bake(&self, id: &JobId) -> Result<(), BakeryError> {
        if !self.store.cancel_by_id(id).await? {
            return Err(BakeryError::not_found("incomplete bake", id));
        }
        tracing::info!(%id, "bake cancelled");
        if let Err(e) = self.runner.cancel(id).await {
            tracing::warn!(%id, error = %e, "runner did not cancel job");
        }
        Ok(())
    }

    pub async fn lookup_status(&self, id: &JobId) -> Result<BakeStatus, BakeryError> {
        self.store
            .get_status_by_id(id)
            .await?
            .ok_or_else(|| BakeryError::not_found("bake status", id))
    }

    pub async fn lookup_bake(&self, id: &JobId) -> Result<Bake, BakeryError> {
        self.store
            .get_bake_details_by_id(id)
            .await?
            .ok_or_else(|| BakeryError::not_found("bake", id))
    }

    pub async fn lookup_logs(&self, id: &JobId) -> Result<BakeLogs, BakeryError> {
        self.store.get_logs_by_id(id).await?.ok_or_else(|| BakeryError::not_found("bake logs", id))
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
