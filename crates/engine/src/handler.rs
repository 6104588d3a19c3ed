// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider handlers: turn a request into a bake key and a job command.

use crate::BakeryError;
use kiln_core::{Bake, BakeArtifact, BakeKey, BakeRequest, CloudProvider, JobCommand, JobId};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

/// Provider-specific knowledge the orchestrator needs
pub trait BakeHandler: Send + Sync {
    fn provider(&self) -> CloudProvider;

    /// Canonical key; requests for the same artifact must produce equal keys
    fn bake_key(&self, region: &str, request: &BakeRequest) -> BakeKey;

    fn bake_command(&self, region: &str, request: &BakeRequest) -> JobCommand;

    /// Extract artifact details from a finished job's logs
    fn scrape_bake_details(&self, region: &str, id: &JobId, logs: &str) -> Bake {
        scrape_generic(self.provider(), region, id, logs)
    }
}

/// Read `image:`, `ami:` and `artifact:` lines out of build output.
///
/// Labels are case-insensitive and may follow a `==> builder:` prefix.
pub fn scrape_generic(provider: CloudProvider, region: &str, id: &JobId, logs: &str) -> Bake {
    let mut bake = Bake::new(id.clone());
    let mut references = Vec::new();

    for line in logs.lines() {
        let mut line = line.trim();
        if let Some(rest) = line.strip_prefix("==>") {
            line = rest.split_once(':').map_or(rest, |(_, tail)| tail).trim();
        }
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match label.trim().to_ascii_lowercase().as_str() {
            "image" => bake.image_name = Some(value.to_string()),
            "ami" => bake.ami = Some(value.to_string()),
            "artifact" => references.push(value.to_string()),
            _ => {}
        }
    }

    if references.is_empty() {
        references.extend(bake.ami.clone());
    }
    for reference in references {
        bake.artifacts.push(BakeArtifact {
            kind: format!("{provider}/image"),
            name: bake.image_name.clone().unwrap_or_else(|| reference.clone()),
            reference,
            location: Some(region.to_string()),
        });
    }
    bake
}

/// Handler that bakes with a packer template per provider
#[derive(Debug, Clone)]
pub struct PackerBakeHandler {
    provider: CloudProvider,
    packer: String,
    template_dir: PathBuf,
}

impl PackerBakeHandler {
    pub fn new(
        provider: CloudProvider,
        packer: impl Into<String>,
        template_dir: impl Into<PathBuf>,
    ) -> Self {
        Self { provider, packer: packer.into(), template_dir: template_dir.into() }
    }

    fn template(&self, request: &BakeRequest) -> String {
        request.template_file_name.clone().unwrap_or_else(|| format!("{}.json", self.provider))
    }

    fn packages(request: &BakeRequest) -> Vec<&str> {
        let unique: BTreeSet<&str> = request.packages().into_iter().collect();
        unique.into_iter().collect()
    }

    /// Template variables in a fixed order; absent fields are omitted
    fn variables(&self, region: &str, request: &BakeRequest) -> Vec<(&'static str, String)> {
        let optional = [
            ("base_os", &request.base_os),
            ("base_label", &request.base_label),
            ("base_ami", &request.base_ami),
            ("vm_type", &request.vm_type),
            ("store_type", &request.store_type),
            ("ami_name", &request.ami_name),
            ("ami_suffix", &request.ami_suffix),
            ("build_host", &request.build_host),
            ("build_number", &request.build_number),
            ("commit_hash", &request.commit_hash),
        ];

        let mut vars = vec![("provider", self.provider.to_string()), ("region", region.to_string())];
        vars.extend(optional.into_iter().filter_map(|(name, v)| Some((name, v.clone()?))));

        let packages = Self::packages(request);
        if !packages.is_empty() {
            vars.push(("package_list", packages.join(" ")));
        }
        if request.enhanced_networking {
            vars.push(("enhanced_networking", "true".to_string()));
        }
        if request.upgrade {
            vars.push(("upgrade", "true".to_string()));
        }
        vars
    }
}

impl BakeHandler for PackerBakeHandler {
    fn provider(&self) -> CloudProvider {
        self.provider
    }

    fn bake_key(&self, region: &str, request: &BakeRequest) -> BakeKey {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();

        BakeKey::builder()
            .part(self.provider.to_string())
            .part(region)
            .part(field(&request.base_os))
            .part(field(&request.base_label))
            .part(field(&request.base_ami))
            .part(field(&request.vm_type))
            .part(field(&request.store_type))
            .part(request.enhanced_networking.to_string())
            .list(Self::packages(request))
            .part(field(&request.ami_name))
            .part(field(&request.ami_suffix))
            .part(request.upgrade.to_string())
            .part(self.template(request))
            .pairs(&request.extended_attributes)
            .build()
    }

    fn bake_command(&self, region: &str, request: &BakeRequest) -> JobCommand {
        let mut command = JobCommand::new(&self.packer).args(["build", "-color=false"]);
        for (name, value) in self.variables(region, request) {
            command = command.arg("-var").arg(format!("{name}={value}"));
        }
        for (name, value) in &request.extended_attributes {
            command = command.arg("-var").arg(format!("{name}={value}"));
        }
        let template = self.template_dir.join(self.template(request));
        command.arg(template.to_string_lossy())
    }
}

/// Handlers by provider
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<CloudProvider, Arc<dyn BakeHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A packer handler for every known provider
    pub fn with_packer_defaults(packer: &str, template_dir: impl Into<PathBuf>) -> Self {
        let template_dir = template_dir.into();
        let mut registry = Self::new();
        for provider in CloudProvider::ALL {
            registry.register(PackerBakeHandler::new(provider, packer, template_dir.clone()));
        }
        registry
    }

    /// Add a handler, replacing any for the same provider
    pub fn register(&mut self, handler: impl BakeHandler + 'static) {
        self.handlers.insert(handler.provider(), Arc::new(handler));
    }

    pub fn find(&self, provider: CloudProvider) -> Result<Arc<dyn BakeHandler>, BakeryError> {
        self.handlers
            .get(&provider)
            .cloned()
            .ok_or_else(|| BakeryError::UnknownProvider(provider.to_string()))
    }

    pub fn providers(&self) -> Vec<CloudProvider> {
        let mut providers: Vec<_> = self.handlers.keys().copied().collect();
        providers.sort();
        providers
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
