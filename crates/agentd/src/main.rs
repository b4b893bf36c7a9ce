// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use ftl_agentd::{serve, ServeConfig};
use tokio::io::join;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let filter = std::env::var("FTL_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let step_delay = std::env::var("FTL_AGENTD_STEP_DELAY_MS")
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or_default();

    let stream = join(tokio::io::stdin(), tokio::io::stdout());
    match serve(stream, ServeConfig { step_delay }).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "agent loop ended with an error");
            std::process::ExitCode::FAILURE
        }
    }
}
