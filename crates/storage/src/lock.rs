// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::StoreError;
use async_trait::async_trait;
use kiln_core::BakeKey;

/// TTL-bounded mutual exclusion per bake key.
///
/// At most one holder per key at a time. A lock is never held for a job's
/// whole runtime: it expires on its own, or is superseded once a status is
/// stored for the key.
#[async_trait]
pub trait LockService: Send + Sync + 'static {
    /// Try once to take the lock; `false` when someone else holds it
    async fn acquire_lock(&self, key: &BakeKey) -> Result<bool, StoreError>;

    /// Drop the lock early after a launch that stored nothing
    async fn release_lock(&self, key: &BakeKey) -> Result<(), StoreError>;
}
