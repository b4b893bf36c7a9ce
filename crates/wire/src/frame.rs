// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefixed JSON framing: 8 ASCII hex digits, then a JSON object body.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{FrameError, ProtocolError};
use crate::message::Message;

/// Recommended ceiling on a single frame body, guarding against a corrupt or
/// hostile length prefix forcing an unbounded allocation.
pub const MAX_FRAME: u32 = 64 * 1024 * 1024;

const PREFIX_LEN: usize = 8;

/// Marshal `value` to JSON. Does not add a length prefix.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, FrameError> {
    Ok(serde_json::to_vec(value)?)
}

/// Parse a JSON body into `T`. Does not strip a length prefix.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FrameError> {
    Ok(serde_json::from_slice(bytes)?)
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, body: &[u8]) -> Result<(), FrameError> {
    let len = u32::try_from(body.len()).map_err(|_| ProtocolError::Oversize(u32::MAX))?;
    if len > MAX_FRAME {
        return Err(ProtocolError::Oversize(len).into());
    }
    writer.write_all(format!("{len:08x}").as_bytes()).await?;
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}

async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, FrameError> {
    let mut prefix = [0u8; PREFIX_LEN];
    if let Err(err) = reader.read_exact(&mut prefix).await {
        return Err(match err.kind() {
            std::io::ErrorKind::UnexpectedEof => FrameError::StreamClosed,
            _ => FrameError::Io(err),
        });
    }
    let prefix_str = std::str::from_utf8(&prefix)
        .map_err(|_| ProtocolError::BadPrefix(String::from_utf8_lossy(&prefix).into_owned()))?;
    let len = u32::from_str_radix(prefix_str, 16)
        .map_err(|_| ProtocolError::BadPrefix(prefix_str.to_string()))?;
    if len > MAX_FRAME {
        return Err(ProtocolError::Oversize(len).into());
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await.map_err(|err| match err.kind() {
        std::io::ErrorKind::UnexpectedEof => FrameError::Protocol(ProtocolError::Truncated),
        _ => FrameError::Io(err),
    })?;
    Ok(body)
}

/// Write one length-prefixed message. One flush per message; no interleaving
/// with any other writer of the same stream.
pub async fn write_message<W, T>(writer: &mut W, value: &T) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    write_frame(writer, &encode(value)?).await
}

/// Read one length-prefixed message and decode its body as `T`.
///
/// The body must be a JSON object at the top level; anything else is
/// rejected with `ProtocolError::Shape` before `T`'s own deserialization runs.
pub async fn read_message<R, T>(reader: &mut R) -> Result<T, FrameError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let body = read_frame(reader).await?;
    let value: serde_json::Value = serde_json::from_slice(&body)?;
    if !value.is_object() {
        return Err(ProtocolError::Shape.into());
    }
    Ok(serde_json::from_value(value)?)
}

/// Wraps a single reader/writer stream, sending and receiving [`Message`]s.
pub struct FrameCodec<S> {
    stream: S,
}

impl<S> FrameCodec<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub async fn send(&mut self, message: &Message) -> Result<(), FrameError> {
        write_message(&mut self.stream, message).await
    }

    pub async fn receive(&mut self) -> Result<Message, FrameError> {
        read_message(&mut self.stream).await
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
