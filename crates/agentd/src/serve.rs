// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use ftl_wire::{FrameCodec, FrameError, Message};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::handlers;

/// Artificial delay inserted between frames while "working", so interleaving
/// of `event` frames against the final `result` is observable in tests
/// without relying on scheduler timing.
pub struct ServeConfig {
    pub step_delay: Duration,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self { step_delay: Duration::ZERO }
    }
}

/// Runs the agent protocol loop to completion: emits `hello`, dispatches
/// `module`/`ftl_module` requests against the built-in handler table, and
/// exits cleanly on `shutdown`. Returns on a closed stream or a protocol
/// violation from the controller side.
pub async fn serve<S>(stream: S, config: ServeConfig) -> Result<(), FrameError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    let mut codec = FrameCodec::new(stream);
    codec.send(&Message::Hello { version: env!("CARGO_PKG_VERSION").to_string(), pid: std::process::id() }).await?;

    loop {
        match codec.receive().await {
            Ok(Message::Module { name, args, check_mode }) | Ok(Message::FtlModule { name, args, check_mode }) => {
                let dispatch = handlers::dispatch(&name, &args, check_mode).await;
                for event in dispatch.events {
                    if !config.step_delay.is_zero() {
                        tokio::time::sleep(config.step_delay).await;
                    }
                    codec.send(&Message::Event { event: event.event, message: event.message }).await?;
                }
                codec.send(&Message::Outcome(dispatch.result)).await?;
            }
            Ok(Message::Info) => {
                codec.send(&Message::InfoResponse { capabilities: serde_json::json!(["ftl_noop", "ftl_ping", "ftl_command"]) }).await?;
            }
            Ok(Message::Shutdown) => return Ok(()),
            Ok(other) => {
                tracing::warn!(kind = other.kind_name(), "ignoring unexpected message from controller");
            }
            Err(FrameError::StreamClosed) => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
