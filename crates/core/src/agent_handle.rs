// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handle to a built, content-addressed agent archive.

use std::path::PathBuf;

/// Identifies one built agent archive on local disk.
///
/// `hash` is the first 16 hex characters of SHA-256 over the archive's source
/// bytes followed by its sorted bundled-extension names; it names both the
/// cache file and the remote deployment path, giving content-addressed
/// caching for free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentHandle {
    pub hash: String,
    pub local_archive_path: PathBuf,
}

impl AgentHandle {
    pub fn new(hash: impl Into<String>, local_archive_path: PathBuf) -> Self {
        Self { hash: hash.into(), local_archive_path }
    }

    /// The path the archive should be deployed to on a remote host.
    pub fn remote_path(&self, extension: &str) -> String {
        format!("/tmp/agent-{}.{}", self.hash, extension)
    }
}

#[cfg(test)]
#[path = "agent_handle_tests.rs"]
mod tests;
