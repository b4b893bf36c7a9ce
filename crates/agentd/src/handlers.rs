// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The three always-available modules, mirroring the controller's native
//! registry so round-trip tests exercise the same behavior on both ends of
//! the wire.

use std::collections::HashMap;

use ftl_wire::WireResult;
use serde_json::Value;

/// One `event` frame to emit before the final result.
pub struct ProgressEvent {
    pub event: String,
    pub message: String,
}

pub struct Dispatch {
    pub events: Vec<ProgressEvent>,
    pub result: WireResult,
}

fn ok(changed: bool, msg: impl Into<String>) -> WireResult {
    WireResult { changed, failed: false, msg: Some(msg.into()), data: None, warnings: Vec::new(), diff: None }
}

fn failure(msg: impl Into<String>) -> WireResult {
    WireResult { changed: false, failed: true, msg: Some(msg.into()), data: None, warnings: Vec::new(), diff: None }
}

pub async fn dispatch(name: &str, args: &HashMap<String, Value>, check_mode: bool) -> Dispatch {
    match name {
        "ftl_noop" => Dispatch { events: Vec::new(), result: ok(false, "noop") },
        "ftl_ping" => Dispatch {
            events: vec![ProgressEvent { event: "progress".to_string(), message: "pinging".to_string() }],
            result: ok(false, "pong"),
        },
        "ftl_command" => command(args, check_mode).await,
        other => Dispatch { events: Vec::new(), result: failure(format!("unknown module: {other}")) },
    }
}

async fn command(args: &HashMap<String, Value>, check_mode: bool) -> Dispatch {
    let cmd = match args.get("cmd").and_then(Value::as_str) {
        Some(cmd) => cmd,
        None => return Dispatch { events: Vec::new(), result: failure("ftl_command requires a `cmd` string argument") },
    };

    if check_mode {
        return Dispatch { events: Vec::new(), result: ok(false, format!("check mode: would run `{cmd}`")) };
    }

    let events = vec![ProgressEvent { event: "progress".to_string(), message: format!("running `{cmd}`") }];
    let result = match tokio::process::Command::new("sh").arg("-c").arg(cmd).output().await {
        Ok(output) if output.status.success() => {
            let mut result = ok(true, format!("`{cmd}` exited 0"));
            result.data = Some(serde_json::json!({
                "stdout": String::from_utf8_lossy(&output.stdout),
                "stderr": String::from_utf8_lossy(&output.stderr),
            }));
            result
        }
        Ok(output) => failure(format!(
            "`{cmd}` exited {}: {}",
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr)
        )),
        Err(err) => failure(format!("failed to spawn `{cmd}`: {err}")),
    };

    Dispatch { events, result }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
