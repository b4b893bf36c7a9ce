// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference [`SessionFactory`] for development, tests, and loopback hosts
//! explicitly routed through the agent path.

use std::path::Path;

use async_trait::async_trait;
use ftl_core::Host;
use tokio::process::Command;

use crate::error::TransportError;
use crate::transport::{AgentTransport, ChildTransport, SessionFactory};

/// Spawns the agent archive as a local child process over piped stdio.
///
/// `open` runs `{interpreter} {archive_path}`; `upload` is a same-filesystem
/// copy, skipped when source and destination already agree on size — the
/// local analogue of a real SSH factory skipping re-upload once the remote
/// reports the hash present.
pub struct LocalProcessSessionFactory {
    interpreter: String,
}

impl LocalProcessSessionFactory {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self { interpreter: interpreter.into() }
    }
}

impl Default for LocalProcessSessionFactory {
    fn default() -> Self {
        Self::new("sh")
    }
}

#[async_trait]
impl SessionFactory for LocalProcessSessionFactory {
    async fn open(
        &self,
        host: &Host,
        archive_path: &Path,
    ) -> Result<Box<dyn AgentTransport>, TransportError> {
        let mut command = Command::new(&self.interpreter);
        command
            .arg(archive_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|err| {
            TransportError::SpawnFailed(format!(
                "{} {}: {err}",
                self.interpreter,
                archive_path.display()
            ))
        })?;

        tracing::debug!(
            host = %host.name,
            interpreter = %self.interpreter,
            archive = %archive_path.display(),
            "spawned local agent process"
        );

        Ok(Box::new(ChildTransport::new(child)?))
    }

    async fn upload(&self, host: &Host, local: &Path, remote: &str) -> Result<(), TransportError> {
        let remote_path = Path::new(remote);
        if let (Ok(src_meta), Ok(dst_meta)) = (
            tokio::fs::metadata(local).await,
            tokio::fs::metadata(remote_path).await,
        ) {
            if src_meta.len() == dst_meta.len() {
                tracing::debug!(host = %host.name, remote, "archive already present, skipping upload");
                return Ok(());
            }
        }

        if let Some(parent) = remote_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|err| TransportError::UploadFailed {
                host: host.name.clone(),
                reason: err.to_string(),
            })?;
        }

        tokio::fs::copy(local, remote_path).await.map_err(|err| TransportError::UploadFailed {
            host: host.name.clone(),
            reason: err.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "local_process_tests.rs"]
mod tests;
