// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Failures opening a transport to a host or uploading an archive to it.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to spawn agent process: {0}")]
    SpawnFailed(String),
    #[error("failed to upload archive to host {host}: {reason}")]
    UploadFailed { host: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
