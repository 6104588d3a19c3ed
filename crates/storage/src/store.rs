// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::StoreError;
use async_trait::async_trait;
use kiln_core::{Bake, BakeKey, BakeLogs, BakeOrigin, BakeRequest, BakeStatus, JobId};

/// Everything recorded with the first status of a bake attempt
#[derive(Debug, Clone)]
pub struct NewBakeStatus<'a> {
    pub key: &'a BakeKey,
    pub region: &'a str,
    pub request: &'a BakeRequest,
    pub status: &'a BakeStatus,
    pub command: &'a str,
}

/// Durable bake status records, indexed by bake key and by status id.
#[async_trait]
pub trait BakeStore: Send + Sync + 'static {
    /// Atomically record a new status for a key.
    ///
    /// If the key already maps to a reusable status (running, or completed
    /// successfully) that status is returned and nothing is written. Otherwise
    /// the new status is stored under key and id, the key's lock is
    /// superseded, and the new status is returned.
    async fn store_new_status(&self, new: NewBakeStatus<'_>) -> Result<BakeStatus, StoreError>;

    async fn get_status_by_key(&self, key: &BakeKey) -> Result<Option<BakeStatus>, StoreError>;

    async fn get_status_by_id(&self, id: &JobId) -> Result<Option<BakeStatus>, StoreError>;

    async fn get_bake_details_by_id(&self, id: &JobId) -> Result<Option<Bake>, StoreError>;

    async fn get_logs_by_id(&self, id: &JobId) -> Result<Option<BakeLogs>, StoreError>;

    async fn get_origin_by_id(&self, id: &JobId) -> Result<Option<BakeOrigin>, StoreError>;

    /// Unmap a key; `false` when nothing was mapped. Records stay readable by id.
    async fn delete_by_key(&self, key: &BakeKey) -> Result<bool, StoreError>;

    /// Mark an incomplete bake cancelled; `false` when absent or already terminal
    async fn cancel_by_id(&self, id: &JobId) -> Result<bool, StoreError>;

    /// Replace a stored status with a fresher one; terminal records are never
    /// rewritten. Returns whether the write happened.
    async fn update_status(&self, status: &BakeStatus) -> Result<bool, StoreError>;

    async fn store_logs(&self, id: &JobId, logs: &str) -> Result<(), StoreError>;

    async fn store_bake_details(&self, bake: &Bake) -> Result<(), StoreError>;

    /// Ids of every stored status that is still running
    async fn incomplete_bake_ids(&self) -> Result<Vec<JobId>, StoreError>;
}
