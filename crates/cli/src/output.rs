// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use kiln_core::{Bake, BakeStatus};
use kiln_engine::BakePlan;
use serde::Serialize;
use std::fmt::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything `kiln bake` reports about one bake
#[derive(Debug, Serialize)]
pub struct BakeReport {
    pub key: String,
    pub status: BakeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bake: Option<Bake>,
}

/// One line: `<id> <STATE>[/<RESULT>]`
pub fn format_status(status: &BakeStatus) -> String {
    match status.result {
        Some(result) if status.is_terminal() => {
            format!("{} {}/{}", status.id, status.state, result)
        }
        _ => format!("{} {}", status.id, status.state),
    }
}

pub fn format_bake(bake: &Bake) -> String {
    let mut out = String::new();
    if let Some(image) = &bake.image_name {
        let _ = writeln!(out, "image: {image}");
    }
    if let Some(ami) = &bake.ami {
        let _ = writeln!(out, "ami: {ami}");
    }
    for artifact in &bake.artifacts {
        let location = artifact.location.as_deref().unwrap_or("-");
        let _ = writeln!(out, "artifact: {} {} ({location})", artifact.kind, artifact.reference);
    }
    out
}

pub fn print_plan(plan: &BakePlan, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("key: {}", plan.key);
            println!("command: {}", plan.command.display());
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "key": plan.key,
                "command": plan.command.display(),
                "request": plan.request,
            });
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
    }
    Ok(())
}

pub fn print_report(report: &BakeReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", format_status(&report.status));
            if let Some(bake) = &report.bake {
                print!("{}", format_bake(bake));
            }
            if let Some(logs) = &report.logs {
                println!("--- logs ---");
                print!("{logs}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
