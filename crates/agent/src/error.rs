// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Failures opening or driving one agent conversation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("handshake failed: {0}")]
    HandshakeFailed(String),
    #[error(transparent)]
    Transport(#[from] ftl_transport::TransportError),
    #[error(transparent)]
    Protocol(#[from] ftl_wire::ProtocolError),
    /// The call was cancelled; the session is now poisoned and must be
    /// discarded by whoever holds it (the connection pool).
    #[error("call cancelled")]
    Cancelled,
    /// The session was already poisoned by a prior cancellation or protocol
    /// violation and must not be reused.
    #[error("session is poisoned and must be discarded")]
    Poisoned,
}

impl From<ftl_wire::FrameError> for SessionError {
    fn from(err: ftl_wire::FrameError) -> Self {
        match err {
            ftl_wire::FrameError::StreamClosed => {
                SessionError::Protocol(ftl_wire::ProtocolError::Unexpected("stream closed".to_string()))
            }
            ftl_wire::FrameError::Protocol(p) => SessionError::Protocol(p),
            ftl_wire::FrameError::Io(io) => {
                SessionError::Transport(ftl_transport::TransportError::Io(io))
            }
            ftl_wire::FrameError::Json(json) => {
                SessionError::Protocol(ftl_wire::ProtocolError::Unexpected(json.to_string()))
            }
        }
    }
}
