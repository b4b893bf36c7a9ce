// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The "library caller" surface described in SPEC_FULL.md §6: `configure`,
//! `execute`, `close`. Wires together the resolver, the native registry, the
//! connection pool, and the scheduler behind one facade so the CLI (and any
//! other embedder) never touches those crates directly.

use std::path::PathBuf;
use std::sync::Arc;

use ftl_builder::{AgentBuilder, Extension};
use ftl_core::{CancelSignal, Host, ModuleInvocation, NativeRegistry, RunSummary, SystemClock};
use ftl_engine::{default_registry, LocalExternalRunner, LocalNativeRunner, RemoteRunner, Runner, Scheduler, SchedulerConfig};
use ftl_pool::ConnectionPool;
use ftl_resolver::{Resolver, ResolverConfig};
use ftl_transport::LocalProcessSessionFactory;

use crate::config::ControllerConfig;

/// Entry point bundled into every agent archive: a shim that execs the
/// `ftl-agentd` binary already installed on the target, so the archive
/// itself stays a tiny interpreter script regardless of target platform.
const AGENT_ENTRY_POINT: &[u8] = b"#!/bin/sh\nexec ftl-agentd\n";

/// Runs one module invocation across a set of hosts.
///
/// Built from a [`ControllerConfig`]; holds the connection pool for its
/// lifetime so repeated `execute` calls reuse already-open sessions.
pub struct Controller {
    resolver: Arc<Resolver>,
    scheduler: Scheduler<SystemClock>,
    pool: Arc<ConnectionPool>,
    dry_run: bool,
}

impl Controller {
    /// `configure()` per §6: builds every collaborator from `config`.
    pub fn configure(config: &ControllerConfig) -> Self {
        let clock = SystemClock;
        let registry: NativeRegistry = default_registry(clock.clone());
        let resolver = Arc::new(Resolver::new(registry, ResolverConfig::new(config.module_roots.clone())));

        let builder = AgentBuilder::new(AGENT_ENTRY_POINT.to_vec(), config.cache_dir.clone());
        let extensions: Vec<Extension> = config
            .module_bundle
            .iter()
            .map(|name| Extension { name: name.clone(), path: PathBuf::from(name) })
            .collect();
        let factory = Arc::new(LocalProcessSessionFactory::new(config.interpreter.clone()));
        let pool = Arc::new(ConnectionPool::new(factory, builder, extensions, "sh"));

        let local_native: Arc<dyn Runner> = Arc::new(LocalNativeRunner::new());
        let local_external: Arc<dyn Runner> = Arc::new(LocalExternalRunner::new(clock.clone()));
        let remote: Arc<dyn Runner> = Arc::new(RemoteRunner::new(pool.clone(), clock.clone()));
        let scheduler = Scheduler::new(resolver.clone(), local_native, local_external, remote, clock);

        Self { resolver, scheduler, pool, dry_run: config.dry_run }
    }

    /// `execute(cancel_signal, target_expression, module_name, args) → Summary`
    /// per §6. `target_expression` is a comma-separated host-name list, the
    /// literal stand-in for the out-of-scope inventory loader.
    pub async fn execute(
        &self,
        cancel: &CancelSignal,
        target_expression: &str,
        module_name: &str,
        args: ftl_core::ArgMap,
        scheduler_config: &SchedulerConfig,
    ) -> RunSummary {
        let hosts: Vec<Host> = target_expression
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Host::new(name, name))
            .collect();

        let invocation =
            ModuleInvocation::new(module_name).with_args(args).with_dry_run(self.dry_run);

        self.scheduler.execute(cancel, &hosts, &invocation, scheduler_config).await
    }

    /// Lets callers enumerate what `ftl run` would resolve a name to,
    /// without executing anything (used by `ftl modules list`).
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// `close()` per §6: drains the pool, releasing every open session.
    pub async fn close(&self) -> Result<(), ftl_pool::PoolShutdownError> {
        self.pool.drain().await
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
