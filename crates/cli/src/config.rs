// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered configuration: `ftl.toml` supplies defaults, `FTL_*` environment
//! variables override individual fields, and explicit CLI flags take final
//! precedence. Precedence, high to low: CLI flag > env var > config file >
//! built-in default.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_CHUNK_SIZE: usize = 10;

/// Resolved configuration a [`crate::controller::Controller`] is built from.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub chunk_size: usize,
    pub fail_fast: bool,
    pub dry_run: bool,
    pub module_bundle: Vec<String>,
    pub module_roots: Vec<PathBuf>,
    pub cache_dir: PathBuf,
    pub interpreter: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            fail_fast: false,
            dry_run: false,
            module_bundle: Vec::new(),
            module_roots: Vec::new(),
            cache_dir: default_cache_dir(),
            interpreter: "sh".to_string(),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(std::env::temp_dir).join("ftl")
}

/// Shape of `ftl.toml`. Every field optional; absent fields fall through to
/// the built-in default or an environment override.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FileConfig {
    chunk_size: Option<usize>,
    fail_fast: Option<bool>,
    dry_run: Option<bool>,
    #[serde(default)]
    module_bundle: Vec<String>,
    #[serde(default)]
    module_roots: Vec<PathBuf>,
    cache_dir: Option<PathBuf>,
    interpreter: Option<String>,
}

fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.is_file() {
        return Ok(FileConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })
}

fn env_usize(key: &str) -> Result<Option<usize>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|err| ConfigError::InvalidValue { field: key.to_string(), message: err.to_string() }),
        Err(_) => Ok(None),
    }
}

fn env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => match raw.as_str() {
            "1" | "true" | "yes" => Ok(Some(true)),
            "0" | "false" | "no" => Ok(Some(false)),
            other => Err(ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("expected a boolean, got `{other}`"),
            }),
        },
        Err(_) => Ok(None),
    }
}

fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key)
        .ok()
        .map(|raw| raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect())
}

/// Overrides parsed from CLI flags. `None` means "not passed on the command
/// line", so the env/file layers still apply.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub chunk_size: Option<usize>,
    pub fail_fast: Option<bool>,
    pub dry_run: Option<bool>,
    pub module_roots: Option<Vec<PathBuf>>,
}

/// Loads `config_path` (or `ftl.toml` in the current directory if unset),
/// layers `FTL_*` environment overrides over it, then applies `cli`.
pub fn load(config_path: Option<&Path>, cli: CliOverrides) -> Result<ControllerConfig, ConfigError> {
    let default_path = PathBuf::from("ftl.toml");
    let path = config_path.unwrap_or(&default_path);
    let file = load_file(path)?;
    let defaults = ControllerConfig::default();

    let mut config = ControllerConfig {
        chunk_size: file.chunk_size.unwrap_or(defaults.chunk_size),
        fail_fast: file.fail_fast.unwrap_or(defaults.fail_fast),
        dry_run: file.dry_run.unwrap_or(defaults.dry_run),
        module_bundle: if file.module_bundle.is_empty() { defaults.module_bundle } else { file.module_bundle },
        module_roots: if file.module_roots.is_empty() { defaults.module_roots } else { file.module_roots },
        cache_dir: file.cache_dir.unwrap_or(defaults.cache_dir),
        interpreter: file.interpreter.unwrap_or(defaults.interpreter),
    };

    if let Some(chunk_size) = env_usize("FTL_CHUNK_SIZE")? {
        config.chunk_size = chunk_size;
    }
    if let Some(fail_fast) = env_bool("FTL_FAIL_FAST")? {
        config.fail_fast = fail_fast;
    }
    if let Some(dry_run) = env_bool("FTL_DRY_RUN")? {
        config.dry_run = dry_run;
    }
    if let Some(roots) = env_list("FTL_MODULE_ROOTS") {
        config.module_roots = roots.into_iter().map(PathBuf::from).collect();
    }
    if let Ok(cache_dir) = std::env::var("FTL_CACHE_DIR") {
        config.cache_dir = PathBuf::from(cache_dir);
    }
    if let Ok(interpreter) = std::env::var("FTL_SSH_PYTHON") {
        config.interpreter = interpreter;
    }

    if let Some(chunk_size) = cli.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(fail_fast) = cli.fail_fast {
        config.fail_fast = fail_fast;
    }
    if let Some(dry_run) = cli.dry_run {
        config.dry_run = dry_run;
    }
    if let Some(roots) = cli.module_roots {
        config.module_roots = roots;
    }

    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
