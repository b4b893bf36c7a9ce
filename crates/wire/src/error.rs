// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Framing and protocol error types.

use thiserror::Error;

/// A malformed frame or an out-of-sequence message.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame length prefix is not 8 hex digits: {0:?}")]
    BadPrefix(String),
    #[error("frame body of {0} bytes exceeds the maximum frame size")]
    Oversize(u32),
    #[error("stream ended before the frame body was fully read")]
    Truncated,
    #[error("frame body is not a JSON object")]
    Shape,
    #[error("unexpected message type: {0}")]
    Unexpected(String),
}

/// Everything that can go wrong reading or writing one frame.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The stream closed cleanly before a length prefix began — a normal
    /// end-of-conversation signal, not a protocol violation.
    #[error("stream closed")]
    StreamClosed,
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
