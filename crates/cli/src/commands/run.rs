// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ftl run`: resolves `ControllerConfig`, executes one module invocation
//! across the target hosts, prints a per-host summary, and maps the result
//! onto the exit-code discipline of SPEC_FULL.md §6.

use ftl_core::{ArgMap, CancelCause, CancelSignal};
use ftl_engine::SchedulerConfig;

use crate::config::ControllerConfig;
use crate::controller::Controller;
use crate::error::Error;

pub struct RunArgs {
    pub target: String,
    pub module: String,
    pub args: Option<String>,
    pub chunk_size: Option<usize>,
    pub fail_fast: bool,
    pub check: bool,
}

/// Runs `args.module` across `args.target`'s hosts and returns the process
/// exit code: `0` if nothing failed, `1` if any host failed, `130` if the
/// run was cancelled (e.g. by Ctrl-C) before it finished.
pub async fn run(config: ControllerConfig, args: RunArgs) -> Result<i32, Error> {
    let invocation_args: ArgMap = match args.args {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|err| Error::InvalidArgs(format!("--args must be a JSON object: {err}")))?,
        None => ArgMap::new(),
    };

    let mut config = config;
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if args.fail_fast {
        config.fail_fast = true;
    }
    if args.check {
        config.dry_run = true;
    }

    let scheduler_config = SchedulerConfig { chunk_size: config.chunk_size, fail_fast: config.fail_fast };
    let controller = Controller::configure(&config);

    let cancel = CancelSignal::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel(CancelCause::UserRequested);
        }
    });

    let summary = controller.execute(&cancel, &args.target, &args.module, invocation_args, &scheduler_config).await;
    controller.close().await?;

    print_summary(&summary);

    if cancel.is_cancelled() {
        Ok(130)
    } else if summary.failed > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn print_summary(summary: &ftl_core::RunSummary) {
    let mut hosts: Vec<&String> = summary.results.keys().collect();
    hosts.sort();

    for host in hosts {
        let result = &summary.results[host];
        let status = if result.failed {
            "FAILED"
        } else if result.skipped {
            "SKIPPED"
        } else if result.changed {
            "CHANGED"
        } else {
            "ok"
        };
        match &result.msg {
            Some(msg) => println!("{host:<24} {status:<8} {msg}"),
            None => println!("{host:<24} {status:<8}"),
        }
    }

    println!(
        "\n{} hosts, {} ok, {} changed, {} failed, {} skipped ({} ms)",
        summary.hosts_attempted(),
        summary.successful - summary.changed,
        summary.changed,
        summary.failed,
        summary.skipped,
        summary.duration_ms,
    );
}
