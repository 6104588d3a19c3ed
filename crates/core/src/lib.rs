// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kiln-core: value types shared by the kiln bakery crates

pub mod macros;

pub mod bake;
pub mod clock;
pub mod command;
pub mod id;
pub mod key;
pub mod provider;
pub mod request;
pub mod status;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bake::{Bake, BakeArtifact, BakeLogs, BakeOrigin};
pub use clock::{Clock, FakeClock, SystemClock};
pub use command::JobCommand;
pub use id::{short, JobId};
pub use key::{BakeKey, KeyBuilder};
pub use provider::{CloudProvider, UnknownProviderName};
pub use request::BakeRequest;
#[cfg(any(test, feature = "test-support"))]
pub use status::BakeStatusBuilder;
pub use status::{BakeResult, BakeState, BakeStatus};
