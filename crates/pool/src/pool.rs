// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-host cached agent sessions, built and uploaded lazily on first use.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use ftl_agent::AgentSession;
use ftl_builder::{AgentBuilder, Extension};
use ftl_core::Host;
use ftl_transport::SessionFactory;
use parking_lot::RwLock;

use crate::error::{PoolError, PoolShutdownError};

/// Caches one [`AgentSession`] per host name, building and deploying the
/// agent archive on first use and discarding poisoned sessions.
pub struct ConnectionPool {
    factory: Arc<dyn SessionFactory>,
    builder: AgentBuilder,
    extensions: Vec<Extension>,
    archive_extension: String,
    sessions: RwLock<HashMap<String, Arc<AgentSession>>>,
    uploaded: parking_lot::Mutex<HashSet<(String, String)>>,
}

impl ConnectionPool {
    pub fn new(
        factory: Arc<dyn SessionFactory>,
        builder: AgentBuilder,
        extensions: Vec<Extension>,
        archive_extension: impl Into<String>,
    ) -> Self {
        Self {
            factory,
            builder,
            extensions,
            archive_extension: archive_extension.into(),
            sessions: RwLock::new(HashMap::new()),
            uploaded: parking_lot::Mutex::new(HashSet::new()),
        }
    }

    /// Returns a healthy session for `host`, opening and deploying one if
    /// none exists yet or the cached one has been poisoned.
    pub async fn acquire(&self, host: &Host) -> Result<Arc<AgentSession>, PoolError> {
        if let Some(session) = self.healthy_session(host).await {
            return Ok(session);
        }

        // Double-checked: another caller may have won the race while we were
        // evicting a poisoned entry above.
        if let Some(session) = self.healthy_session(host).await {
            return Ok(session);
        }

        let handle = self.builder.build(&self.extensions).await?;
        let remote_path = handle.remote_path(&self.archive_extension);

        let upload_key = (host.name.clone(), handle.hash.clone());
        let needs_upload = {
            let mut uploaded = self.uploaded.lock();
            uploaded.insert(upload_key.clone())
        };
        if needs_upload {
            if let Err(err) =
                self.factory.upload(host, &handle.local_archive_path, &remote_path).await
            {
                self.uploaded.lock().remove(&upload_key);
                return Err(err.into());
            }
        }

        let transport = self.factory.open(host, Path::new(&remote_path)).await?;
        let session = Arc::new(AgentSession::open(transport).await?);
        self.sessions.write().insert(host.name.clone(), session.clone());
        tracing::info!(host = %host.name, hash = %handle.hash, "opened agent session");
        Ok(session)
    }

    async fn healthy_session(&self, host: &Host) -> Option<Arc<AgentSession>> {
        let existing = self.sessions.read().get(&host.name).cloned();
        let session = existing?;
        if session.is_poisoned().await {
            self.evict(&host.name).await;
            None
        } else {
            Some(session)
        }
    }

    /// Removes the cached session for `host_name` and closes it. A no-op if
    /// no session is cached.
    pub async fn evict(&self, host_name: &str) {
        let session = self.sessions.write().remove(host_name);
        if let Some(session) = session {
            tracing::info!(host = host_name, "evicting agent session");
            session.close().await;
        }
    }

    /// Snapshots and clears the session map, closing every session
    /// concurrently. Errors from individual closes are joined rather than
    /// short-circuiting, so one stuck session never hides the others.
    pub async fn drain(&self) -> Result<(), PoolShutdownError> {
        let sessions: Vec<(String, Arc<AgentSession>)> = {
            let mut map = self.sessions.write();
            std::mem::take(&mut *map).into_iter().collect()
        };
        tracing::info!(sessions = sessions.len(), "draining connection pool");

        let mut tasks = Vec::with_capacity(sessions.len());
        for (host_name, session) in sessions {
            tasks.push((host_name, tokio::spawn(async move { session.close().await })));
        }

        let mut failures = Vec::new();
        for (host_name, task) in tasks {
            if let Err(join_err) = task.await {
                failures.push(format!("{host_name}: {join_err}"));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PoolShutdownError { failures })
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
