// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use super::*;
use ftl_core::{CancelCause, CancelSignal, FakeClock};

fn invocation(name: &str) -> ModuleInvocation {
    ModuleInvocation::new(name)
}

#[tokio::test]
async fn noop_is_never_changed_and_stamps_the_clock() {
    let clock = FakeClock::new();
    clock.set_epoch_ms(42);
    let module = NoopModule::new(clock);
    let result = module.call(&invocation("ftl_noop"), &CancelSignal::new()).await;
    assert!(!result.changed);
    assert!(!result.failed);
    assert_eq!(result.started_at_ms, 42);
}

#[tokio::test]
async fn ping_reports_pong() {
    let module = PingModule::new(FakeClock::new());
    let result = module.call(&invocation("ftl_ping"), &CancelSignal::new()).await;
    assert_eq!(result.msg.as_deref(), Some("pong"));
    assert!(!result.changed);
}

#[tokio::test]
async fn command_without_cmd_argument_fails() {
    let module = CommandModule::new(FakeClock::new());
    let result = module.call(&invocation("ftl_command"), &CancelSignal::new()).await;
    assert!(result.failed);
}

#[tokio::test]
async fn command_in_dry_run_does_not_execute() {
    let module = CommandModule::new(FakeClock::new());
    let invocation = invocation("ftl_command")
        .with_args(HashMap::from([("cmd".to_string(), Value::String("touch /should-not-exist".to_string()))]))
        .with_dry_run(true);
    let result = module.call(&invocation, &CancelSignal::new()).await;
    assert!(!result.changed);
    assert!(result.msg.unwrap_or_default().contains("check mode"));
}

#[tokio::test]
async fn command_runs_and_captures_stdout() {
    let module = CommandModule::new(FakeClock::new());
    let invocation = invocation("ftl_command")
        .with_args(HashMap::from([("cmd".to_string(), Value::String("echo hi".to_string()))]));
    let result = module.call(&invocation, &CancelSignal::new()).await;
    assert!(result.changed);
    assert!(!result.failed);
    assert!(result.stdout.contains("hi"));
}

#[tokio::test]
async fn command_surfaces_nonzero_exit_as_failure() {
    let module = CommandModule::new(FakeClock::new());
    let invocation = invocation("ftl_command")
        .with_args(HashMap::from([("cmd".to_string(), Value::String("exit 3".to_string()))]));
    let result = module.call(&invocation, &CancelSignal::new()).await;
    assert!(result.failed);
}

#[tokio::test]
async fn command_is_killed_promptly_when_already_cancelled() {
    let module = CommandModule::new(FakeClock::new());
    let invocation = invocation("ftl_command")
        .with_args(HashMap::from([("cmd".to_string(), Value::String("sleep 5".to_string()))]));
    let cancel = CancelSignal::new();
    cancel.cancel(CancelCause::UserRequested);

    let result = module.call(&invocation, &cancel).await;

    assert!(result.failed);
}

#[test]
fn default_registry_ships_all_three_builtins() {
    let registry = default_registry(FakeClock::new());
    assert!(registry.contains("ftl_noop"));
    assert!(registry.contains("ftl_ping"));
    assert!(registry.contains("ftl_command"));
}
