// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable storage for [`StateDocument`], with a JSON-file reference
//! implementation that writes via a temp file, fsyncs, and renames over the
//! target so a crash mid-write can never leave a half-written document live.

use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::document::StateDocument;
use crate::error::StateError;

pub trait StateStore: Send + Sync {
    fn load(&self) -> Result<StateDocument, StateError>;
    fn save(&self, doc: &StateDocument) -> Result<(), StateError>;
}

/// Stores the document as pretty-printed JSON at a single path.
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

impl StateStore for JsonFileStateStore {
    fn load(&self) -> Result<StateDocument, StateError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, doc: &StateDocument) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(doc)?;
        let tmp_path = self.tmp_path();

        let mut file = File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// True when a state file exists at `path` and has been written at least
/// once; used to distinguish "no prior run" from "corrupt state file".
pub fn exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
