// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Failures surfaced while a [`crate::Runner`] executes one module invocation.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Pool(#[from] ftl_pool::PoolError),
    #[error(transparent)]
    Session(#[from] ftl_agent::SessionError),
    #[error(transparent)]
    Drain(#[from] ftl_pool::PoolShutdownError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// An external module's stdout was not a valid `WireResult` document.
    #[error("malformed module output: {0}")]
    MalformedOutput(String),
    /// A runner was asked to execute a [`ftl_core::ModuleKind`] it does not
    /// handle, e.g. a `LocalNativeRunner` given `ModuleKind::External`.
    #[error("runner cannot handle this module kind")]
    WrongKind,
}
