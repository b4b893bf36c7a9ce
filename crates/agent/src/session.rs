// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One live conversation with a remote agent process.

use ftl_core::{CancelSignal, ModuleInvocation};
use ftl_transport::AgentTransport;
use ftl_wire::{FrameCodec, Message, WireResult};
use tokio::sync::{mpsc, Mutex};

use crate::error::SessionError;

/// One emitted `event` frame, forwarded to the caller while a module runs.
#[derive(Debug, Clone)]
pub struct AgentEvent {
    pub event: String,
    pub message: String,
}

/// Where `call` forwards `event` frames received before the matching result.
pub type EventSink = mpsc::UnboundedSender<AgentEvent>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Created,
    Ready,
    Busy,
    ShutdownSent,
    Closed,
}

struct Inner {
    codec: FrameCodec<Box<dyn AgentTransport>>,
    state: State,
    poisoned: bool,
}

/// A handshake-completed session. Only one request may be in flight at a
/// time; this is enforced by an internal async mutex, so `call` and `close`
/// are safe to invoke concurrently from multiple tasks.
pub struct AgentSession {
    inner: Mutex<Inner>,
    pub agent_version: String,
    pub agent_pid: u32,
}

impl std::fmt::Debug for AgentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSession")
            .field("agent_version", &self.agent_version)
            .field("agent_pid", &self.agent_pid)
            .finish_non_exhaustive()
    }
}

impl AgentSession {
    /// Complete the handshake over an already-open transport. Fails with
    /// `HandshakeFailed` unless the first frame is `hello`.
    pub async fn open(transport: Box<dyn AgentTransport>) -> Result<Self, SessionError> {
        let mut codec = FrameCodec::new(transport);
        match codec.receive().await {
            Ok(Message::Hello { version, pid }) => {
                tracing::debug!(version = %version, pid, "agent handshake complete");
                Ok(Self {
                    inner: Mutex::new(Inner { codec, state: State::Ready, poisoned: false }),
                    agent_version: version,
                    agent_pid: pid,
                })
            }
            Ok(other) => Err(SessionError::HandshakeFailed(format!(
                "expected hello, got {}",
                other.kind_name()
            ))),
            Err(ftl_wire::FrameError::StreamClosed) => {
                Err(SessionError::HandshakeFailed("stream closed before hello".to_string()))
            }
            Err(err) => Err(SessionError::HandshakeFailed(err.to_string())),
        }
    }

    /// Send one module invocation and collect its result, forwarding any
    /// `event` frames received first to `event_sink`.
    ///
    /// Honors `cancel`: if it trips while waiting on the agent, the session
    /// is poisoned, a best-effort `shutdown` frame is sent, and `Cancelled`
    /// is returned. A poisoned session must never be reused.
    pub async fn call(
        &self,
        invocation: &ModuleInvocation,
        as_native: bool,
        event_sink: &EventSink,
        cancel: &CancelSignal,
    ) -> Result<WireResult, SessionError> {
        let mut guard = self.inner.lock().await;
        if guard.poisoned {
            return Err(SessionError::Poisoned);
        }

        let request = if as_native {
            Message::FtlModule {
                name: invocation.name.clone(),
                args: invocation.args.clone(),
                check_mode: invocation.dry_run,
            }
        } else {
            Message::Module {
                name: invocation.name.clone(),
                args: invocation.args.clone(),
                check_mode: invocation.dry_run,
            }
        };

        guard.state = State::Busy;
        if let Err(err) = guard.codec.send(&request).await {
            guard.poisoned = true;
            return Err(err.into());
        }

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    guard.poisoned = true;
                    let _ = guard.codec.send(&Message::Shutdown).await;
                    guard.state = State::ShutdownSent;
                    let cause = cancel.cause();
                    tracing::warn!(?cause, "agent call cancelled");
                    return Err(SessionError::Cancelled);
                }
                frame = guard.codec.receive() => {
                    match frame {
                        Ok(Message::Event { event, message }) => {
                            let _ = event_sink.send(AgentEvent { event, message });
                            continue;
                        }
                        Ok(Message::Outcome(result)) => {
                            guard.state = State::Ready;
                            return Ok(result);
                        }
                        Ok(other) => {
                            guard.poisoned = true;
                            return Err(ftl_wire::ProtocolError::Unexpected(format!(
                                "unexpected message while awaiting result: {}",
                                other.kind_name()
                            ))
                            .into());
                        }
                        Err(err) => {
                            guard.poisoned = true;
                            return Err(err.into());
                        }
                    }
                }
            }
        }
    }

    /// Idempotent. Sends `shutdown` (errors swallowed) the first time and
    /// marks the session closed; subsequent calls are no-ops.
    pub async fn close(&self) {
        let mut guard = self.inner.lock().await;
        if guard.state == State::Closed {
            return;
        }
        let _ = guard.codec.send(&Message::Shutdown).await;
        guard.state = State::Closed;
    }

    pub async fn is_poisoned(&self) -> bool {
        self.inner.lock().await.poisoned
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
