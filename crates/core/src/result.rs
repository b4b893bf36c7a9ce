// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-host module execution results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Before/after snapshot attached to a result when a module reports one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diff {
    pub before: String,
    pub after: String,
}

/// The outcome of running one module invocation against one host.
///
/// Invariant: `failed` implies `!skipped`. `changed` is only meaningful when
/// `!failed`. Constructors enforce both; there is no public way to build a
/// `ModuleResult` that violates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleResult {
    pub changed: bool,
    pub failed: bool,
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<Diff>,
    pub started_at_ms: u64,
    pub duration_ms: u64,
}

impl ModuleResult {
    /// A result that succeeded and reported a change.
    pub fn changed(started_at_ms: u64, duration_ms: u64) -> Self {
        Self::ok(true, started_at_ms, duration_ms)
    }

    /// A result that succeeded without changing anything.
    pub fn unchanged(started_at_ms: u64, duration_ms: u64) -> Self {
        Self::ok(false, started_at_ms, duration_ms)
    }

    fn ok(changed: bool, started_at_ms: u64, duration_ms: u64) -> Self {
        Self {
            changed,
            failed: false,
            skipped: false,
            msg: None,
            data: None,
            warnings: Vec::new(),
            stdout: String::new(),
            stderr: String::new(),
            diff: None,
            started_at_ms,
            duration_ms,
        }
    }

    /// A failure. `changed` is forced to `false`; failed results are never skipped.
    pub fn failure(msg: impl Into<String>, started_at_ms: u64, duration_ms: u64) -> Self {
        Self {
            changed: false,
            failed: true,
            skipped: false,
            msg: Some(msg.into()),
            data: None,
            warnings: Vec::new(),
            stdout: String::new(),
            stderr: String::new(),
            diff: None,
            started_at_ms,
            duration_ms,
        }
    }

    /// A skipped invocation: never failed, never changed.
    pub fn skipped(msg: impl Into<String>, started_at_ms: u64, duration_ms: u64) -> Self {
        Self {
            changed: false,
            failed: false,
            skipped: true,
            msg: Some(msg.into()),
            data: None,
            warnings: Vec::new(),
            stdout: String::new(),
            stderr: String::new(),
            diff: None,
            started_at_ms,
            duration_ms,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_diff(mut self, diff: Diff) -> Self {
        self.diff = Some(diff);
        self
    }

    pub fn with_stdio(mut self, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self.stderr = stderr.into();
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
