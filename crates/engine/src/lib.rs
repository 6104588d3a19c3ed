// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kiln-engine: bake orchestration and deduplication
//!
//! [`Orchestrator`] runs the create protocol against a [`kiln_storage::LockService`],
//! a [`kiln_storage::BakeStore`] and a [`kiln_adapters::JobRunner`]. [`Bakery`]
//! puts provider handlers in front of it, and [`StatusPoller`] finalizes bakes
//! once their jobs finish.

mod bakery;
mod config;
mod error;
mod handler;
mod orchestrator;
mod poller;

pub use bakery::{BakePlan, Bakery};
pub use config::BakeryConfig;
pub use error::BakeryError;
pub use handler::{scrape_generic, BakeHandler, HandlerRegistry, PackerBakeHandler};
pub use orchestrator::Orchestrator;
pub use poller::StatusPoller;
