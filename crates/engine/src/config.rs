// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bakery timing and defaults.

use kiln_core::CloudProvider;
use std::time::Duration;

pub const DEFAULT_FAIL_FAST_WINDOW: Duration = Duration::from_millis(1000);
pub const DEFAULT_LOCK_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_LOCK_WAIT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_STATUS_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Process-wide bakery settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakeryConfig {
    /// Provider used when a request names none
    pub default_provider: CloudProvider,
    /// Grace period between job start and the fail-fast probe
    pub fail_fast_window: Duration,
    /// How often a lock contender re-reads the key's status
    pub lock_poll_interval: Duration,
    /// How long a lock contender waits before retrying the lock
    pub lock_wait_timeout: Duration,
    pub status_poll_interval: Duration,
}

impl Default for BakeryConfig {
    fn default() -> Self {
        Self {
            default_provider: CloudProvider::Aws,
            fail_fast_window: DEFAULT_FAIL_FAST_WINDOW,
            lock_poll_interval: DEFAULT_LOCK_POLL_INTERVAL,
            lock_wait_timeout: DEFAULT_LOCK_WAIT_TIMEOUT,
            status_poll_interval: DEFAULT_STATUS_POLL_INTERVAL,
        }
    }
}

impl BakeryConfig {
    kiln_core::setters! {
        set {
            default_provider: CloudProvider,
            fail_fast_window: Duration,
            lock_poll_interval: Duration,
            lock_wait_timeout: Duration,
            status_poll_interval: Duration,
        }
    }
}
