// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use kiln_engine::BakeryError;
use std::fmt;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_UNKNOWN_PROVIDER: i32 = 2;
pub const EXIT_LAUNCH_FAILURE: i32 = 3;
pub const EXIT_NOT_FOUND: i32 = 4;
pub const EXIT_LOCK_TIMEOUT: i32 = 5;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<BakeryError> for ExitError {
    fn from(err: BakeryError) -> Self {
        let code = match &err {
            BakeryError::NotFound(_) => EXIT_NOT_FOUND,
            BakeryError::UnknownProvider(_) => EXIT_UNKNOWN_PROVIDER,
            BakeryError::LaunchFailure { .. } => EXIT_LAUNCH_FAILURE,
            BakeryError::LockContentionTimeout { .. } => EXIT_LOCK_TIMEOUT,
            BakeryError::Store(_) | BakeryError::Runner(_) => EXIT_FAILURE,
        };
        Self::new(code, err.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
