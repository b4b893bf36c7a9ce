// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chunked execution: the heart of the system. Splits the target host list
//! into fixed-size chunks, runs every host in a chunk concurrently, and
//! (optionally) cancels the rest of the current chunk's in-flight work the
//! moment one host in it fails.

use std::sync::Arc;
use std::time::Instant;

use ftl_core::{CancelCause, CancelSignal, Clock, Host, ModuleInvocation, ModuleKind, ModuleResult, RunSummary};
use ftl_resolver::Resolver;

use crate::aggregator::Aggregator;
use crate::runner::Runner;
use crate::time::elapsed_ms;

/// Tunables for one [`Scheduler::execute`] call.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Hosts processed concurrently per chunk. Must be at least 1; a value
    /// of 0 is treated as 1.
    pub chunk_size: usize,
    /// Stop launching new chunks, and cancel the rest of the current one,
    /// the moment any host in a chunk fails.
    pub fail_fast: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { chunk_size: 10, fail_fast: false }
    }
}

/// Drives one module invocation across a list of hosts.
pub struct Scheduler<C: Clock> {
    resolver: Arc<Resolver>,
    local_native: Arc<dyn Runner>,
    local_external: Arc<dyn Runner>,
    remote: Arc<dyn Runner>,
    clock: C,
}

impl<C: Clock + 'static> Scheduler<C> {
    pub fn new(
        resolver: Arc<Resolver>,
        local_native: Arc<dyn Runner>,
        local_external: Arc<dyn Runner>,
        remote: Arc<dyn Runner>,
        clock: C,
    ) -> Self {
        Self { resolver, local_native, local_external, remote, clock }
    }

    /// Runs `invocation` against every host in `hosts`, chunked per
    /// `config.chunk_size`. Every host gets exactly one entry in the
    /// returned [`RunSummary`], including hosts skipped because an earlier
    /// chunk triggered `fail_fast`, or whose runner task panicked.
    pub async fn execute(
        &self,
        cancel: &CancelSignal,
        hosts: &[Host],
        invocation: &ModuleInvocation,
        config: &SchedulerConfig,
    ) -> RunSummary {
        let chunk_size = config.chunk_size.max(1);
        let run_id = ftl_core::RunId::new();
        let aggregator = Arc::new(Aggregator::new(self.clock.epoch_ms()));
        let overall_start = Instant::now();
        let mut stopped_early = false;

        for (chunk_index, chunk) in hosts.chunks(chunk_size).enumerate() {
            tracing::info!(run = %run_id, chunk = chunk_index, hosts = chunk.len(), "chunk starting");
            let chunk_start = Instant::now();
            let chunk_cancel = cancel.child_token();
            let mut handles = Vec::with_capacity(chunk.len());

            for host in chunk {
                let host = host.clone();
                let invocation = invocation.clone();
                let chunk_cancel = chunk_cancel.clone();
                let resolver = Arc::clone(&self.resolver);
                let local_native = Arc::clone(&self.local_native);
                let local_external = Arc::clone(&self.local_external);
                let remote = Arc::clone(&self.remote);
                let aggregator = Arc::clone(&aggregator);
                let fail_fast = config.fail_fast;
                let clock = self.clock.clone();
                let host_name = host.name.clone();

                let handle = tokio::spawn(async move {
                    let result = run_one(
                        &resolver,
                        local_native.as_ref(),
                        local_external.as_ref(),
                        remote.as_ref(),
                        &chunk_cancel,
                        &host,
                        &invocation,
                        &clock,
                    )
                    .await;
                    let failed = result.failed;
                    if failed {
                        tracing::warn!(host = %host.name, msg = result.msg.as_deref().unwrap_or(""), "host failed");
                    }
                    aggregator.record(host.name.clone(), result);
                    if failed && fail_fast {
                        chunk_cancel.cancel(CancelCause::FailFast { host: host.name.clone() });
                    }
                    failed
                });
                handles.push((host_name, handle));
            }

            let mut chunk_failed = false;
            for (host_name, handle) in handles {
                match handle.await {
                    Ok(failed) => chunk_failed |= failed,
                    Err(join_err) => {
                        chunk_failed = true;
                        aggregator.record(
                            host_name.clone(),
                            ModuleResult::failure(
                                format!("runner task panicked: {join_err}"),
                                self.clock.epoch_ms(),
                                0,
                            ),
                        );
                        if config.fail_fast {
                            chunk_cancel.cancel(CancelCause::FailFast { host: host_name });
                        }
                    }
                }
            }

            tracing::info!(
                run = %run_id,
                chunk = chunk_index,
                failed = chunk_failed,
                elapsed_ms = elapsed_ms(&chunk_start),
                "chunk completed"
            );

            if config.fail_fast && chunk_failed {
                stopped_early = true;
                break;
            }
        }

        if stopped_early {
            tracing::warn!(run = %run_id, "stopping after a chunk failure because fail_fast is set");
        }

        aggregator.snapshot(elapsed_ms(&overall_start))
    }
}

/// Resolves `invocation.name`, then dispatches to whichever runner fits the
/// resolved kind and the host's locality. Never panics: every error path
/// converts to a [`ModuleResult::failure`].
#[allow(clippy::too_many_arguments)]
async fn run_one<C: Clock>(
    resolver: &Resolver,
    local_native: &dyn Runner,
    local_external: &dyn Runner,
    remote: &dyn Runner,
    cancel: &CancelSignal,
    host: &Host,
    invocation: &ModuleInvocation,
    clock: &C,
) -> ModuleResult {
    let started_at_ms = clock.epoch_ms();

    if cancel.is_cancelled() {
        return ModuleResult::failure("cancelled before this host started", started_at_ms, 0);
    }

    let kind = match resolver.resolve(&invocation.name) {
        Ok(kind) => kind,
        Err(err) => return ModuleResult::failure(err.to_string(), started_at_ms, 0),
    };

    let runner: &dyn Runner = match (&kind, host.is_local()) {
        (ModuleKind::Excluded { reason }, _) => {
            return ModuleResult::failure(reason.clone(), started_at_ms, 0)
        }
        (ModuleKind::Native { .. } | ModuleKind::NativeShadowing { .. }, true) => local_native,
        (ModuleKind::External { .. }, true) => local_external,
        (_, false) => remote,
    };

    match runner.run(cancel, host, invocation, &kind).await {
        Ok(result) => result,
        Err(err) => ModuleResult::failure(err.to_string(), started_at_ms, 0),
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
