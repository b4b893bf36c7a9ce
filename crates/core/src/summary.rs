// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregated results of one scheduler run.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::result::ModuleResult;

/// Host-name → result mapping plus running counters.
///
/// Invariant, enforced by [`RunSummary::record`]: `successful + failed` equals
/// the number of hosts recorded so far, `changed <= successful`, and
/// `skipped <= successful`. A "synthetic cancellation" result (produced by the
/// scheduler for chunk members that never ran) is recorded as a failure and is
/// never counted as successful.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub results: HashMap<String, ModuleResult>,
    pub successful: u32,
    pub failed: u32,
    pub changed: u32,
    pub skipped: u32,
    #[serde(default)]
    pub started_at_ms: u64,
    #[serde(default)]
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn new(started_at_ms: u64) -> Self {
        Self { started_at_ms, ..Self::default() }
    }

    /// Fold one host's result into the summary. Idempotent per host name only
    /// if called once; calling twice for the same host double-counts, which
    /// callers must not do (the aggregator holds a lock per insert).
    pub fn record(&mut self, host: impl Into<String>, result: ModuleResult) {
        if result.failed {
            self.failed += 1;
        } else {
            self.successful += 1;
            if result.changed {
                self.changed += 1;
            }
            if result.skipped {
                self.skipped += 1;
            }
        }
        self.results.insert(host.into(), result);
    }

    pub fn hosts_attempted(&self) -> u32 {
        self.successful + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn finish(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
