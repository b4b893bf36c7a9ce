// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use ftl_core::Host;
use ftl_transport::{AgentTransport, TransportError};
use ftl_wire::{FrameCodec, Message};
use std::sync::atomic::{AtomicUsize, Ordering};

struct FakeFactory {
    open_count: Arc<AtomicUsize>,
    upload_count: Arc<AtomicUsize>,
}

#[async_trait]
impl SessionFactory for FakeFactory {
    async fn open(
        &self,
        _host: &Host,
        _archive_path: &Path,
    ) -> Result<Box<dyn AgentTransport>, TransportError> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        let (client, server) = tokio::io::duplex(8192);
        let mut codec = FrameCodec::new(server);
        tokio::spawn(async move {
            let _ = codec.send(&Message::Hello { version: "1.0".into(), pid: 1 }).await;
        });
        Ok(Box::new(client))
    }

    async fn upload(&self, _host: &Host, _local: &Path, _remote: &str) -> Result<(), TransportError> {
        self.upload_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn test_pool() -> (ConnectionPool, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let open_count = Arc::new(AtomicUsize::new(0));
    let upload_count = Arc::new(AtomicUsize::new(0));
    let factory = Arc::new(FakeFactory { open_count: open_count.clone(), upload_count: upload_count.clone() });
    let cache_dir = tempfile::tempdir().unwrap().into_path();
    let builder = AgentBuilder::new(b"#!/bin/sh".to_vec(), cache_dir);
    let pool = ConnectionPool::new(factory, builder, Vec::new(), "archive");
    (pool, open_count, upload_count)
}

#[tokio::test]
async fn acquire_builds_uploads_and_opens_on_first_use() {
    let (pool, open_count, upload_count) = test_pool();
    let host = Host::new("db1", "10.0.0.1");

    let session = pool.acquire(&host).await.unwrap();

    assert_eq!(session.agent_version, "1.0");
    assert_eq!(open_count.load(Ordering::SeqCst), 1);
    assert_eq!(upload_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn acquire_reuses_the_cached_session_for_a_healthy_host() {
    let (pool, open_count, upload_count) = test_pool();
    let host = Host::new("db1", "10.0.0.1");

    let first = pool.acquire(&host).await.unwrap();
    let second = pool.acquire(&host).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(open_count.load(Ordering::SeqCst), 1);
    assert_eq!(upload_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn evicting_a_session_forces_a_fresh_open_but_not_a_reupload() {
    let (pool, open_count, upload_count) = test_pool();
    let host = Host::new("db1", "10.0.0.1");

    pool.acquire(&host).await.unwrap();
    pool.evict(&host.name).await;
    pool.acquire(&host).await.unwrap();

    assert_eq!(open_count.load(Ordering::SeqCst), 2);
    assert_eq!(upload_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn each_host_gets_its_own_upload_even_with_a_shared_archive_hash() {
    let (pool, open_count, upload_count) = test_pool();
    let a = Host::new("a", "10.0.0.1");
    let b = Host::new("b", "10.0.0.2");

    pool.acquire(&a).await.unwrap();
    pool.acquire(&b).await.unwrap();

    assert_eq!(open_count.load(Ordering::SeqCst), 2);
    assert_eq!(upload_count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn drain_closes_every_session_and_clears_the_map() {
    let (pool, open_count, _upload_count) = test_pool();
    let a = Host::new("a", "10.0.0.1");
    let b = Host::new("b", "10.0.0.2");
    pool.acquire(&a).await.unwrap();
    pool.acquire(&b).await.unwrap();

    pool.drain().await.unwrap();

    // Re-acquiring after drain opens fresh sessions, proving the map was cleared.
    pool.acquire(&a).await.unwrap();
    assert_eq!(open_count.load(Ordering::SeqCst), 3);
}
