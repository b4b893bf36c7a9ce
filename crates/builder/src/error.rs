// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("archive is corrupt: {0}")]
    CorruptArchive(String),
}
