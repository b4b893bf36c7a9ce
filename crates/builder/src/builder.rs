// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assembles the agent archive from the embedded entry point plus requested
//! native extensions, caching the result by content hash.

use std::path::{Path, PathBuf};
use std::time::Instant;

use ftl_core::AgentHandle;

use crate::archive::{self, ArchiveEntry};
use crate::error::BuilderError;
use crate::hash::archive_hash;

/// One extension module to bundle, already resolved to a file on disk.
pub struct Extension {
    pub name: String,
    pub path: PathBuf,
}

/// Builds and caches agent archives under a single cache directory.
pub struct AgentBuilder {
    source: Vec<u8>,
    cache_dir: PathBuf,
}

impl AgentBuilder {
    pub fn new(source: Vec<u8>, cache_dir: PathBuf) -> Self {
        Self { source, cache_dir }
    }

    fn candidate_path(&self, hash: &str) -> PathBuf {
        self.cache_dir.join(format!("agent-{hash}.archive"))
    }

    /// Build (or reuse) the archive for `extensions`. Any change to the
    /// source bytes or the extension set yields a distinct hash and thus a
    /// distinct cache entry; cache entries are never mutated in place.
    pub async fn build(&self, extensions: &[Extension]) -> Result<AgentHandle, BuilderError> {
        let mut names: Vec<String> = extensions.iter().map(|e| e.name.clone()).collect();
        names.sort();
        let hash = archive_hash(&self.source, &names);
        let candidate = self.candidate_path(&hash);

        if let Ok(meta) = tokio::fs::metadata(&candidate).await {
            if meta.len() > 0 {
                tracing::debug!(hash, "agent archive cache hit");
                return Ok(AgentHandle::new(hash, candidate));
            }
        }

        tokio::fs::create_dir_all(&self.cache_dir).await?;
        match self.build_fresh(&hash, &candidate, extensions).await {
            Ok(handle) => Ok(handle),
            Err(err) => {
                let _ = tokio::fs::remove_file(candidate.with_extension("archive.tmp")).await;
                Err(err)
            }
        }
    }

    async fn build_fresh(
        &self,
        hash: &str,
        candidate: &Path,
        extensions: &[Extension],
    ) -> Result<AgentHandle, BuilderError> {
        let scratch = self.cache_dir.join(format!(".build-{hash}-{}", nanoid::nanoid!(8)));
        let result = self.assemble_in(&scratch, hash, candidate, extensions).await;
        let _ = tokio::fs::remove_dir_all(&scratch).await;
        result
    }

    async fn assemble_in(
        &self,
        scratch: &Path,
        hash: &str,
        candidate: &Path,
        extensions: &[Extension],
    ) -> Result<AgentHandle, BuilderError> {
        let start = Instant::now();
        tokio::fs::create_dir_all(scratch).await?;

        let mut entries = vec![ArchiveEntry { name: "agent".to_string(), bytes: self.source.clone() }];
        for extension in extensions {
            let bytes = tokio::fs::read(&extension.path).await?;
            entries.push(ArchiveEntry {
                name: format!("extensions/{}", extension.name),
                bytes,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let packed = archive::pack(&entries)?;
        let tmp_path = candidate.with_extension("archive.tmp");
        tokio::fs::write(&tmp_path, &packed).await?;
        tokio::fs::rename(&tmp_path, candidate).await?;

        tracing::info!(
            hash,
            extensions = extensions.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "built agent archive"
        );
        Ok(AgentHandle::new(hash.to_string(), candidate.to_path_buf()))
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
