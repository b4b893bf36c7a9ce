// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-safe accumulator for per-host results across a run.
//!
//! [`ftl_core::RunSummary`] already knows how to fold one more result in;
//! this just guards it with a mutex so chunk tasks can record concurrently.
//! The lock window is a single `HashMap` insert plus a few counter bumps.

use parking_lot::Mutex;

use ftl_core::{ModuleResult, RunSummary};

pub struct Aggregator {
    inner: Mutex<RunSummary>,
}

impl Aggregator {
    pub fn new(started_at_ms: u64) -> Self {
        Self { inner: Mutex::new(RunSummary::new(started_at_ms)) }
    }

    pub fn record(&self, host: impl Into<String>, result: ModuleResult) {
        self.inner.lock().record(host.into(), result);
    }

    pub fn has_failures(&self) -> bool {
        self.inner.lock().has_failures()
    }

    pub fn hosts_attempted(&self) -> u32 {
        self.inner.lock().hosts_attempted()
    }

    /// Snapshots the current summary and stamps `duration_ms` on the copy,
    /// leaving the live accumulator untouched. Safe to call mid-run; the
    /// scheduler calls it once, at the end, with the real elapsed time.
    pub fn snapshot(&self, duration_ms: u64) -> RunSummary {
        let mut summary = self.inner.lock().clone();
        summary.finish(duration_ms);
        summary
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
