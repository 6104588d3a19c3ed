// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent helpers for running the `kiln` binary in specs.

use std::path::PathBuf;
use tempfile::TempDir;

const KILN_VARS: [&str; 6] = [
    "KILN_CONFIG",
    "KILN_DEFAULT_PROVIDER",
    "KILN_REGION",
    "KILN_PACKER_BINARY",
    "KILN_TEMPLATE_DIR",
    "KILN_LOG",
];

/// Start building a `kiln` invocation
pub fn cli() -> Cli {
    Cli { args: Vec::new(), env: Vec::new(), home: TempDir::new().unwrap() }
}

pub struct Cli {
    args: Vec<String>,
    env: Vec<(String, String)>,
    /// Isolated config dir so a developer's own settings never leak in
    home: TempDir,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.env.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Use `settings` as the settings file
    pub fn settings(self, settings: &Settings) -> Self {
        let path = settings.path().display().to_string();
        self.args(&["--config", &path])
    }

    fn output(&self) -> std::process::Output {
        let mut cmd = assert_cmd::Command::cargo_bin("kiln").unwrap();
        for var in KILN_VARS {
            cmd.env_remove(var);
        }
        cmd.env("XDG_CONFIG_HOME", self.home.path())
            .env("HOME", self.home.path())
            .env("KILN_LOG", "warn")
            .args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.output().unwrap()
    }

    /// Run, expecting exit code 0
    pub fn passes(self) -> Run {
        self.exits_with(0)
    }

    /// Run, expecting `code`
    pub fn exits_with(self, code: i32) -> Run {
        let output = self.output();
        let run = Run {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit status\n--- stdout ---\n{}\n--- stderr ---\n{}",
            run.stdout,
            run.stderr
        );
        run
    }
}

pub struct Run {
    pub stdout: String,
    pub stderr: String,
}

impl Run {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

/// A settings file in a scratch directory
pub struct Settings {
    dir: TempDir,
}

impl Settings {
    /// Fast timings suitable for specs, plus `extra` TOML lines
    pub fn fast(extra: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let contents = format!(
            "fail_fast_ms = 300\npoll_interval_ms = 20\nwait_timeout_ms = 500\nstatus_poll_ms = 20\n{extra}"
        );
        std::fs::write(dir.path().join("config.toml"), contents).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }
}
