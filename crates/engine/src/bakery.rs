// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request-level bakery operations.

use crate::{BakeHandler, BakeryError, HandlerRegistry, Orchestrator};
use kiln_adapters::JobRunner;
use kiln_core::{Bake, BakeKey, BakeLogs, BakeRequest, BakeStatus, JobCommand, JobId};
use kiln_storage::{BakeStore, LockService};
use std::sync::Arc;

/// What a request resolves to, without running anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakePlan {
    pub request: BakeRequest,
    pub key: BakeKey,
    pub command: JobCommand,
}

/// Provider handlers in front of an [`Orchestrator`]
pub struct Bakery<R, L, S> {
    orchestrator: Orchestrator<R, L, S>,
    handlers: HandlerRegistry,
}

impl<R, L, S> Bakery<R, L, S>
where
    R: JobRunner,
    L: LockService,
    S: BakeStore,
{
    pub fn new(orchestrator: Orchestrator<R, L, S>, handlers: HandlerRegistry) -> Self {
        Self { orchestrator, handlers }
    }

    pub fn orchestrator(&self) -> &Orchestrator<R, L, S> {
        &self.orchestrator
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Fill in the default provider and find its handler
    fn resolve(
        &self,
        request: &BakeRequest,
    ) -> Result<(BakeRequest, Arc<dyn BakeHandler>), BakeryError> {
        let provider =
            request.cloud_provider_type.unwrap_or(self.orchestrator.config().default_provider);
        let handler = self.handlers.find(provider)?;
        Ok((request.with_default_provider(provider), handler))
    }

    pub fn plan(&self, region: &str, request: &BakeRequest) -> Result<BakePlan, BakeryError> {
        let (request, handler) = self.resolve(request)?;
        let key = handler.bake_key(region, &request);
        let command = handler.bake_command(region, &request);
        Ok(BakePlan { request, key, command })
    }

    pub async fn create_bake(
        &self,
        region: &str,
        request: &BakeRequest,
        rebake: bool,
    ) -> Result<BakeStatus, BakeryError> {
        let plan = self.plan(region, request)?;
        self.orchestrator.create_bake(&plan.key, region, &plan.request, &plan.command, rebake).await
    }

    pub async fn delete_bake(
        &self,
        region: &str,
        request: &BakeRequest,
    ) -> Result<(), BakeryError> {
        let (request, handler) = self.resolve(request)?;
        self.orchestrator.delete_bake(&handler.bake_key(region, &request)).await
    }

    pub async fn cancel_bake(&self, id: &JobId) -> Result<(), BakeryError> {
        self.orchestrator.cancel_bake(id).await
    }

    pub async fn lookup_status(&self, id: &JobId) -> Result<BakeStatus, BakeryError> {
        self.orchestrator.lookup_status(id).await
    }

    pub async fn lookup_bake(&self, id: &JobId) -> Result<Bake, BakeryError> {
        self.orchestrator.lookup_bake(id).await
    }

    pub async fn lookup_logs(&self, id: &JobId) -> Result<BakeLogs, BakeryError> {
        self.orchestrator.lookup_logs(id).await
    }
}

#[cfg(test)]
#[path = "bakery_tests.rs"]
mod tests;
