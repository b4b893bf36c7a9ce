// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level error type aggregating every crate-local error kind, so `main`
//! can propagate with `?` instead of reaching for `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    State(#[from] ftl_state::StateError),
    #[error(transparent)]
    Builder(#[from] ftl_builder::BuilderError),
    #[error(transparent)]
    Pool(#[from] ftl_pool::PoolError),
    #[error(transparent)]
    PoolShutdown(#[from] ftl_pool::PoolShutdownError),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Failures loading or parsing the layered `ftl.toml` / `FTL_*` / CLI-flag
/// configuration. Fatal at startup; never surfaced mid-run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
