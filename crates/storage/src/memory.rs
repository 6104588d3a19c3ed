// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process bake store.
//!
//! Every operation runs under one mutex, which makes `store_new_status` and
//! `acquire_lock` atomic for all clones of the store. Clones share state, so
//! several orchestrators holding clones behave like instances sharing one
//! external store.

use crate::{BakeStore, LockService, NewBakeStatus, StoreError};
use async_trait::async_trait;
use kiln_core::{
    Bake, BakeKey, BakeLogs, BakeOrigin, BakeRequest, BakeStatus, Clock, JobId, SystemClock,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default bake lock TTL
pub const DEFAULT_LOCK_TTL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
struct BakeRecord {
    key: BakeKey,
    origin: BakeOrigin,
    request: BakeRequest,
    command: String,
    status: BakeStatus,
    logs: Option<String>,
    details: Option<Bake>,
}

#[derive(Debug, Default)]
struct MemoryState {
    locks: HashMap<BakeKey, Instant>,
    keys: HashMap<BakeKey, JobId>,
    records: HashMap<JobId, BakeRecord>,
}

impl MemoryState {
    fn status_for_key(&self, key: &BakeKey) -> Option<&BakeStatus> {
        self.keys.get(key).and_then(|id| self.records.get(id)).map(|r| &r.status)
    }
}

/// Bake store held in process memory
#[derive(Clone)]
pub struct MemoryBakeStore<C: Clock = SystemClock> {
    state: Arc<Mutex<MemoryState>>,
    clock: C,
    lock_ttl: Duration,
}

impl MemoryBakeStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock, DEFAULT_LOCK_TTL)
    }
}

impl Default for MemoryBakeStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryBakeStore<C> {
    pub fn with_clock(clock: C, lock_ttl: Duration) -> Self {
        Self { state: Arc::new(Mutex::new(MemoryState::default())), clock, lock_ttl }
    }

    pub fn lock_ttl(&self) -> Duration {
        self.lock_ttl
    }

    /// Request and rendered command recorded with a bake's first status
    pub fn launch_record(&self, id: &JobId) -> Option<(BakeRequest, String)> {
        self.state.lock().records.get(id).map(|r| (r.request.clone(), r.command.clone()))
    }

    /// Whether a live (unexpired) lock exists for `key`
    pub fn is_locked(&self, key: &BakeKey) -> bool {
        let now = self.clock.now();
        self.state.lock().locks.get(key).is_some_and(|expires| *expires > now)
    }
}

#[async_trait]
impl<C: Clock> LockService for MemoryBakeStore<C> {
    async fn acquire_lock(&self, key: &BakeKey) -> Result<bool, StoreError> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        if state.locks.get(key).is_some_and(|expires| *expires > now) {
            return Ok(false);
        }
        state.locks.insert(key.clone(), now + self.lock_ttl);
        tracing::debug!(%key, ttl_ms = self.lock_ttl.as_millis() as u64, "bake lock acquired");
        Ok(true)
    }

    async fn release_lock(&self, key: &BakeKey) -> Result<(), StoreError> {
        self.state.lock().locks.remove(key);
        Ok(())
    }
}

#[async_trait]
impl<C: Clock> BakeStore for MemoryBakeStore<C> {
    async fn store_new_status(&self, new: NewBakeStatus<'_>) -> Result<BakeStatus, StoreError> {
        let mut state = self.state.lock();
        if let Some(existing) = state.status_for_key(new.key).filter(|s| s.is_reusable()) {
            return Ok(existing.clone());
        }

        let id = new.status.id.clone();
        state.records.insert(
            id.clone(),
            BakeRecord {
                key: new.key.clone(),
                origin: BakeOrigin {
                    region: new.region.to_string(),
                    provider: new.request.cloud_provider_type,
                },
                request: new.request.clone(),
                command: new.command.to_string(),
                status: new.status.clone(),
                logs: new.status.logs_content.clone(),
                details: None,
            },
        );
        state.keys.insert(new.key.clone(), id);
        state.locks.remove(new.key);
        Ok(new.status.clone())
    }

    async fn get_status_by_key(&self, key: &BakeKey) -> Result<Option<BakeStatus>, StoreError> {
        Ok(self.state.lock().status_for_key(key).cloned())
    }

    async fn get_status_by_id(&self, id: &JobId) -> Result<Option<BakeStatus>, StoreError> {
        Ok(self.state.lock().records.get(id).map(|r| r.status.clone()))
    }

    async fn get_bake_details_by_id(&self, id: &JobId) -> Result<Option<Bake>, StoreError> {
        Ok(self.state.lock().records.get(id).and_then(|r| r.details.clone()))
    }

    async fn get_logs_by_id(&self, id: &JobId) -> Result<Option<BakeLogs>, StoreError> {
        Ok(self
            .state
            .lock()
            .records
            .get(id)
            .and_then(|r| r.logs.clone())
            .map(|logs_content| BakeLogs { logs_content }))
    }

    async fn get_origin_by_id(&self, id: &JobId) -> Result<Option<BakeOrigin>, StoreError> {
        Ok(self.state.lock().records.get(id).map(|r| r.origin.clone()))
    }

    async fn delete_by_key(&self, key: &BakeKey) -> Result<bool, StoreError> {
        Ok(self.state.lock().keys.remove(key).is_some())
    }

    async fn cancel_by_id(&self, id: &JobId) -> Result<bool, StoreError> {
        let now = self.clock.epoch_ms();
        let mut state = self.state.lock();
        match state.records.get_mut(id) {
            Some(record) if !record.status.is_terminal() => {
                record.status = record.status.cancelled(now);
                tracing::info!(%id, key = %record.key, "bake marked cancelled");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_status(&self, status: &BakeStatus) -> Result<bool, StoreError> {
        let mut state = self.state.lock();
        let Some(record) = state.records.get_mut(&status.id) else {
            return Ok(false);
        };
        if record.status.is_terminal() {
            return Ok(false);
        }
        record.status = status.clone();
        if let Some(logs) = &status.logs_content {
            record.logs = Some(logs.clone());
        }
        Ok(true)
    }

    async fn store_logs(&self, id: &JobId, logs: &str) -> Result<(), StoreError> {
        if let Some(record) = self.state.lock().records.get_mut(id) {
            record.logs = Some(logs.to_string());
        }
        Ok(())
    }

    async fn store_bake_details(&self, bake: &Bake) -> Result<(), StoreError> {
        if let Some(record) = self.state.lock().records.get_mut(&bake.id) {
            record.details = Some(bake.clone());
        }
        Ok(())
    }

    async fn incomplete_bake_ids(&self) -> Result<Vec<JobId>, StoreError> {
        let state = self.state.lock();
        let mut ids: Vec<JobId> = state
            .records
            .values()
            .filter(|r| r.status.is_running())
            .map(|r| r.status.id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
