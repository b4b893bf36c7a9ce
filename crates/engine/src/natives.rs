// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The three always-available native modules, plus the registry wiring that
//! ships them under their `ftl_`-prefixed names.
//!
//! Each module is generic over [`Clock`] rather than storing `Arc<dyn
//! Clock>`: `Clock` requires `Clone`, which is not object-safe, so the clock
//! is monomorphized into the module and only the resulting struct is erased
//! into `Arc<dyn NativeModule>`.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use ftl_core::{CancelSignal, Clock, ModuleInvocation, ModuleResult, NativeModule, NativeRegistry};
use serde_json::Value;

use crate::time::elapsed_ms;

/// Does nothing, reports unchanged. Useful for connectivity checks and tests.
pub struct NoopModule<C: Clock> {
    clock: C,
}

impl<C: Clock> NoopModule<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl<C: Clock + 'static> NativeModule for NoopModule<C> {
    fn name(&self) -> &str {
        "ftl_noop"
    }

    async fn call(&self, _invocation: &ModuleInvocation, _cancel: &CancelSignal) -> ModuleResult {
        ModuleResult::unchanged(self.clock.epoch_ms(), 0)
    }
}

/// Always unchanged, always reports `msg: "pong"`. Used to distinguish a
/// reachable host from one whose agent never replies.
pub struct PingModule<C: Clock> {
    clock: C,
}

impl<C: Clock> PingModule<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl<C: Clock + 'static> NativeModule for PingModule<C> {
    fn name(&self) -> &str {
        "ftl_ping"
    }

    async fn call(&self, _invocation: &ModuleInvocation, _cancel: &CancelSignal) -> ModuleResult {
        let mut result = ModuleResult::unchanged(self.clock.epoch_ms(), 0);
        result.msg = Some("pong".to_string());
        result
    }
}

/// Runs `args["cmd"]` through `sh -c`. In check mode, reports what it would
/// have run without executing anything.
pub struct CommandModule<C: Clock> {
    clock: C,
}

impl<C: Clock> CommandModule<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl<C: Clock + 'static> NativeModule for CommandModule<C> {
    fn name(&self) -> &str {
        "ftl_command"
    }

    async fn call(&self, invocation: &ModuleInvocation, cancel: &CancelSignal) -> ModuleResult {
        let started_at_ms = self.clock.epoch_ms();
        let start = Instant::now();

        let cmd = match invocation.args.get("cmd").and_then(Value::as_str) {
            Some(cmd) => cmd.to_string(),
            None => {
                return ModuleResult::failure(
                    "ftl_command requires a `cmd` string argument",
                    started_at_ms,
                    elapsed_ms(&start),
                )
            }
        };

        if invocation.dry_run {
            let mut result = ModuleResult::unchanged(started_at_ms, elapsed_ms(&start));
            result.msg = Some(format!("check mode: would run `{cmd}`"));
            return result;
        }

        let child = match tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                return ModuleResult::failure(
                    format!("failed to spawn `{cmd}`: {err}"),
                    started_at_ms,
                    elapsed_ms(&start),
                )
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                // Dropping `child` here kills the subprocess via `kill_on_drop`.
                ModuleResult::failure("cancelled", started_at_ms, elapsed_ms(&start))
            }
            output = child.wait_with_output() => {
                match output {
                    Ok(output) if output.status.success() => {
                        ModuleResult::changed(started_at_ms, elapsed_ms(&start)).with_stdio(
                            String::from_utf8_lossy(&output.stdout),
                            String::from_utf8_lossy(&output.stderr),
                        )
                    }
                    Ok(output) => ModuleResult::failure(
                        format!("`{cmd}` exited {}", output.status.code().unwrap_or(-1)),
                        started_at_ms,
                        elapsed_ms(&start),
                    )
                    .with_stdio(String::from_utf8_lossy(&output.stdout), String::from_utf8_lossy(&output.stderr)),
                    Err(err) => ModuleResult::failure(
                        format!("failed to wait on `{cmd}`: {err}"),
                        started_at_ms,
                        elapsed_ms(&start),
                    ),
                }
            }
        }
    }
}

/// Builds the default registry: `ftl_noop`, `ftl_ping`, `ftl_command`, all
/// sharing `clock`.
pub fn default_registry<C: Clock + 'static>(clock: C) -> NativeRegistry {
    let mut registry = NativeRegistry::new();
    registry.register(Arc::new(NoopModule::new(clock.clone())));
    registry.register(Arc::new(PingModule::new(clock.clone())));
    registry.register(Arc::new(CommandModule::new(clock)));
    registry
}

#[cfg(test)]
#[path = "natives_tests.rs"]
mod tests;
