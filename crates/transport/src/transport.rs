// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The byte-pair an agent session frames its protocol over.

use std::path::Path;
use std::pin::Pin;
use std::process::ExitStatus;
use std::task::{Context, Poll};

use async_trait::async_trait;
use ftl_core::Host;
use tokio::io::{AsyncRead, AsyncWrite, Join, ReadBuf};
use tokio::process::{Child, ChildStdin, ChildStdout};

use crate::error::TransportError;

/// A duplex byte stream an [`crate::SessionFactory`] hands back for framing.
pub trait AgentTransport: AsyncRead + AsyncWrite + Send + Unpin {}
impl<T: AsyncRead + AsyncWrite + Send + Unpin> AgentTransport for T {}

impl std::fmt::Debug for dyn AgentTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn AgentTransport")
    }
}

/// Opens transports to hosts and ships archives to them.
///
/// The real SSH-backed implementation is out of scope; this trait is the seam
/// the pool and runners depend on.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(
        &self,
        host: &Host,
        archive_path: &Path,
    ) -> Result<Box<dyn AgentTransport>, TransportError>;

    async fn upload(&self, host: &Host, local: &Path, remote: &str) -> Result<(), TransportError>;
}

/// A spawned child process's stdio, joined into one `AsyncRead + AsyncWrite`
/// stream. Keeps the [`Child`] handle alive so it can be reaped on close or drop.
pub struct ChildTransport {
    io: Join<ChildStdout, ChildStdin>,
    child: Child,
}

impl ChildTransport {
    pub(crate) fn new(mut child: Child) -> std::io::Result<Self> {
        let stdout = child.stdout.take().ok_or_else(|| {
            std::io::Error::other("child process has no captured stdout")
        })?;
        let stdin = child.stdin.take().ok_or_else(|| {
            std::io::Error::other("child process has no captured stdin")
        })?;
        Ok(Self { io: tokio::io::join(stdout, stdin), child })
    }

    /// Wait for the process to exit. Idempotent: safe to call after the
    /// process has already been reaped.
    pub async fn close(&mut self) -> std::io::Result<ExitStatus> {
        self.child.wait().await
    }
}

impl AsyncRead for ChildTransport {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.io).poll_read(cx, buf)
    }
}

impl AsyncWrite for ChildTransport {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        Pin::new(&mut self.io).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.io).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.io).poll_shutdown(cx)
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
