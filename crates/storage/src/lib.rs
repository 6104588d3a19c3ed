// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kiln-storage: the shared bake store
//!
//! Coordination between bakery instances goes through two capabilities:
//!
//! - [`LockService`]: a short-lived, TTL-bounded lock per bake key that gates
//!   which instance *attempts* a launch
//! - [`BakeStore`]: durable status records whose `store_new_status` is an
//!   atomic store-if-absent-else-return-existing, the point where truly
//!   simultaneous launches are resolved
//!
//! Instances hold no shared in-memory state; every mutation of a key's record
//! goes through these primitives.

mod error;
mod lock;
mod memory;
mod store;

pub use error::StoreError;
pub use lock::LockService;
pub use memory::{MemoryBakeStore, DEFAULT_LOCK_TTL};
pub use store::{BakeStore, NewBakeStatus};
