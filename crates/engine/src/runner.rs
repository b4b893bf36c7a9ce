// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executes one resolved module invocation against one host.
//!
//! Three implementations cover the three places a module can actually run:
//! in-process (native), as a local subprocess (external, loopback host), or
//! over an agent session fetched from the connection pool (everything else).

use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use ftl_agent::SessionError;
use ftl_core::{CancelSignal, Clock, Host, ModuleInvocation, ModuleKind, ModuleResult};
use ftl_pool::ConnectionPool;
use ftl_wire::WireResult;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::error::RunnerError;
use crate::time::elapsed_ms;

/// Runs one module invocation against one host and reports the outcome.
///
/// `kind` is the resolver's classification for `invocation.name`; passing it
/// alongside `invocation` saves every runner from resolving the name a
/// second time, at the cost of a slightly wider trait than the bare
/// `(host, invocation) -> result` shape described elsewhere — a deliberate
/// trade against a redundant resolver call per host per chunk.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn run(
        &self,
        cancel: &CancelSignal,
        host: &Host,
        invocation: &ModuleInvocation,
        kind: &ModuleKind,
    ) -> Result<ModuleResult, RunnerError>;

    /// Releases any resources the runner holds (e.g. pooled sessions).
    async fn close(&self) -> Result<(), RunnerError>;
}

/// Calls a native handle directly, in-process. Never touches the network.
#[derive(Default)]
pub struct LocalNativeRunner;

impl LocalNativeRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Runner for LocalNativeRunner {
    async fn run(
        &self,
        cancel: &CancelSignal,
        _host: &Host,
        invocation: &ModuleInvocation,
        kind: &ModuleKind,
    ) -> Result<ModuleResult, RunnerError> {
        let handle = match kind {
            ModuleKind::Native { handle } => handle,
            ModuleKind::NativeShadowing { handle, .. } => handle,
            _ => return Err(RunnerError::WrongKind),
        };
        Ok(handle.call(invocation, cancel).await)
    }

    async fn close(&self) -> Result<(), RunnerError> {
        Ok(())
    }
}

/// Runs an external module file as a local subprocess, for hosts that
/// resolve as loopback. The invocation's arguments are written to the
/// child's stdin as JSON; stdout is parsed as a [`WireResult`] document.
pub struct LocalExternalRunner<C: Clock> {
    clock: C,
}

impl<C: Clock> LocalExternalRunner<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl<C: Clock + 'static> Runner for LocalExternalRunner<C> {
    async fn run(
        &self,
        cancel: &CancelSignal,
        _host: &Host,
        invocation: &ModuleInvocation,
        kind: &ModuleKind,
    ) -> Result<ModuleResult, RunnerError> {
        let path = match kind {
            ModuleKind::External { path } => path,
            _ => return Err(RunnerError::WrongKind),
        };

        let started_at_ms = self.clock.epoch_ms();
        let start = Instant::now();
        let payload = serde_json::to_vec(&invocation.args)?;

        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let wait = async move {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(&payload).await?;
                drop(stdin);
            }
            child.wait_with_output().await
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                // Dropping `wait` here drops the owned `child`, which kills
                // the subprocess via `kill_on_drop`.
                Ok(ModuleResult::failure("cancelled", started_at_ms, elapsed_ms(&start)))
            }
            output = wait => {
                let output = output?;
                if !output.status.success() {
                    return Ok(ModuleResult::failure(
                        format!(
                            "module exited {}: {}",
                            output.status.code().unwrap_or(-1),
                            String::from_utf8_lossy(&output.stderr)
                        ),
                        started_at_ms,
                        elapsed_ms(&start),
                    ));
                }
                let wire: WireResult = serde_json::from_slice(&output.stdout)
                    .map_err(|err| RunnerError::MalformedOutput(err.to_string()))?;
                Ok(from_wire(wire, started_at_ms, elapsed_ms(&start)))
            }
        }
    }

    async fn close(&self) -> Result<(), RunnerError> {
        Ok(())
    }
}

/// Runs a module over an agent session fetched from the connection pool.
/// Evicts the session on any non-cancellation error so the next attempt
/// opens a fresh one.
pub struct RemoteRunner<C: Clock> {
    pool: Arc<ConnectionPool>,
    clock: C,
}

impl<C: Clock> RemoteRunner<C> {
    pub fn new(pool: Arc<ConnectionPool>, clock: C) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl<C: Clock + 'static> Runner for RemoteRunner<C> {
    async fn run(
        &self,
        cancel: &CancelSignal,
        host: &Host,
        invocation: &ModuleInvocation,
        kind: &ModuleKind,
    ) -> Result<ModuleResult, RunnerError> {
        let as_native = matches!(kind, ModuleKind::Native { .. } | ModuleKind::NativeShadowing { .. });
        let started_at_ms = self.clock.epoch_ms();
        let start = Instant::now();

        let session = self.pool.acquire(host).await?;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let call_result = session.call(invocation, as_native, &tx, cancel).await;
        drop(tx);
        while let Some(event) = rx.recv().await {
            tracing::debug!(host = %host.name, event = %event.event, message = %event.message, "agent progress");
        }

        match call_result {
            Ok(wire) => Ok(from_wire(wire, started_at_ms, elapsed_ms(&start))),
            Err(SessionError::Cancelled) => {
                Ok(ModuleResult::failure("cancelled", started_at_ms, elapsed_ms(&start)))
            }
            Err(err) => {
                self.pool.evict(&host.name).await;
                Err(err.into())
            }
        }
    }

    async fn close(&self) -> Result<(), RunnerError> {
        self.pool.drain().await?;
        Ok(())
    }
}

/// Converts a wire result into the runner-layer [`ModuleResult`], stamping
/// the timing the wire protocol doesn't carry.
fn from_wire(wire: WireResult, started_at_ms: u64, duration_ms: u64) -> ModuleResult {
    let mut result = if wire.failed {
        ModuleResult::failure(wire.msg.clone().unwrap_or_default(), started_at_ms, duration_ms)
    } else if wire.changed {
        ModuleResult::changed(started_at_ms, duration_ms)
    } else {
        ModuleResult::unchanged(started_at_ms, duration_ms)
    };
    if !wire.failed {
        result.msg = wire.msg;
    }
    if let Some(data) = wire.data {
        result = result.with_data(data);
    }
    if let Some(diff) = wire.diff {
        result = result.with_diff(diff);
    }
    if !wire.warnings.is_empty() {
        result = result.with_warnings(wire.warnings);
    }
    result
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
