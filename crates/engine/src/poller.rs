// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background finalization of running bakes.
//!
//! Each pass refreshes every incomplete status from the job runner. Running
//! jobs get their partial logs recorded; finished jobs get their final status,
//! logs and scraped artifact details stored. A job the runner no longer knows
//! is finalized as a failure so the key stops looking busy.

use crate::{BakeryError, HandlerRegistry};
use kiln_adapters::{JobRunner, RunnerError};
use kiln_core::{BakeResult, BakeStatus, Clock, JobId, SystemClock};
use kiln_storage::BakeStore;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub struct StatusPoller<R, S, C: Clock = SystemClock> {
    runner: R,
    store: S,
    handlers: HandlerRegistry,
    interval: Duration,
    clock: C,
}

impl<R: JobRunner, S: BakeStore> StatusPoller<R, S, SystemClock> {
    pub fn new(runner: R, store: S, handlers: HandlerRegistry, interval: Duration) -> Self {
        Self::with_clock(runner, store, handlers, interval, SystemClock)
    }
}

impl<R, S, C> StatusPoller<R, S, C>
where
    R: JobRunner,
    S: BakeStore,
    C: Clock,
{
    pub fn with_clock(
        runner: R,
        store: S,
        handlers: HandlerRegistry,
        interval: Duration,
        clock: C,
    ) -> Self {
        Self { runner, store, handlers, interval, clock }
    }

    /// Refresh every incomplete bake once; returns how many were finalized.
    pub async fn poll_once(&self) -> Result<usize, BakeryError> {
        let mut finalized = 0;
        for id in self.store.incomplete_bake_ids().await? {
            match self.refresh(&id).await {
                Ok(true) => finalized += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!(%id, error = %e, "status refresh failed"),
            }
        }
        Ok(finalized)
    }

    async fn refresh(&self, id: &JobId) -> Result<bool, BakeryError> {
        let status = match self.runner.refresh_status(id).await {
            Ok(status) => status,
            Err(RunnerError::NotFound(_)) => {
                BakeStatus::completed(id.clone(), BakeResult::Failure, self.clock.epoch_ms())
                    .with_logs(format!("job {id} is no longer known to the runner"))
            }
            Err(e) => return Err(e.into()),
        };

        if !self.store.update_status(&status).await? || status.is_running() {
            return Ok(false);
        }

        tracing::info!(%id, result = ?status.result, "bake finished");
        if let Some(logs) = status.logs_content.as_deref() {
            self.record_output(id, logs).await?;
        }
        if let Err(e) = self.runner.reap(id).await {
            tracing::debug!(%id, error = %e, "runner kept no record to reap");
        }
        Ok(true)
    }

    /// Persist final logs and the artifact details scraped from them
    async fn record_output(&self, id: &JobId, logs: &str) -> Result<(), BakeryError> {
        self.store.store_logs(id, logs).await?;

        let Some(origin) = self.store.get_origin_by_id(id).await? else {
            return Ok(());
        };
        let Some(provider) = origin.provider else {
            return Ok(());
        };
        let bake = self.handlers.find(provider)?.scrape_bake_details(&origin.region, id, logs);
        self.store.store_bake_details(&bake).await?;
        Ok(())
    }

    /// Poll until `id` is terminal
    pub async fn wait_until_terminal(&self, id: &JobId) -> Result<BakeStatus, BakeryError> {
        loop {
            self.poll_once().await?;
            let status = self
                .store
                .get_status_by_id(id)
                .await?
                .ok_or_else(|| BakeryError::not_found("bake status", id))?;
            if status.is_terminal() {
                return Ok(status);
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Poll on a fixed interval until cancelled
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        tracing::warn!(error = %e, "status poll failed");
                    }
                }
            }
        }
        tracing::debug!("status poller stopped");
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
