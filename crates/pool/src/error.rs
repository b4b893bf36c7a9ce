// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error(transparent)]
    Builder(#[from] ftl_builder::BuilderError),
    #[error(transparent)]
    Transport(#[from] ftl_transport::TransportError),
    #[error(transparent)]
    Session(#[from] ftl_agent::SessionError),
}

/// Raised by [`crate::ConnectionPool::drain`] when one or more sessions could
/// not be closed cleanly. Carries every failure rather than just the first,
/// so callers see the full blast radius of a shutdown.
#[derive(Debug, Error)]
#[error("pool drain failed for {} session(s): {}", .failures.len(), .failures.join("; "))]
pub struct PoolShutdownError {
    pub failures: Vec<String>,
}
