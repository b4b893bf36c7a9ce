// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write as _;

fn write_extension(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> Extension {
    let path = dir.path().join(format!("{name}.lua"));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    Extension { name: name.to_string(), path }
}

#[tokio::test]
async fn fresh_build_produces_an_archive_with_the_entry_point_and_extensions() {
    let cache_dir = tempfile::tempdir().unwrap();
    let ext_dir = tempfile::tempdir().unwrap();
    let builder = AgentBuilder::new(b"#!/bin/sh\necho hi".to_vec(), cache_dir.path().to_path_buf());
    let ping = write_extension(&ext_dir, "ping", b"return 1");

    let handle = builder.build(&[ping]).await.unwrap();

    assert!(handle.local_archive_path.exists());
    let packed = tokio::fs::read(&handle.local_archive_path).await.unwrap();
    let entries = archive::unpack(&packed).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e.name == "agent"));
    assert!(entries.iter().any(|e| e.name == "extensions/ping"));
}

#[tokio::test]
async fn identical_inputs_hit_the_cache_on_the_second_build() {
    let cache_dir = tempfile::tempdir().unwrap();
    let ext_dir = tempfile::tempdir().unwrap();
    let builder = AgentBuilder::new(b"same source".to_vec(), cache_dir.path().to_path_buf());
    let ping = write_extension(&ext_dir, "ping", b"return 1");

    let first = builder.build(&[ping]).await.unwrap();
    let modified_after_first_build = std::fs::metadata(&first.local_archive_path).unwrap().modified().unwrap();

    let ping_again = write_extension(&ext_dir, "ping", b"return 1");
    let second = builder.build(&[ping_again]).await.unwrap();
    let modified_after_second_build = std::fs::metadata(&second.local_archive_path).unwrap().modified().unwrap();

    assert_eq!(first.hash, second.hash);
    assert_eq!(first.local_archive_path, second.local_archive_path);
    assert_eq!(modified_after_first_build, modified_after_second_build);
}

#[tokio::test]
async fn changing_source_changes_the_hash_and_cache_entry() {
    let cache_dir = tempfile::tempdir().unwrap();
    let a = AgentBuilder::new(b"source a".to_vec(), cache_dir.path().to_path_buf());
    let b = AgentBuilder::new(b"source b".to_vec(), cache_dir.path().to_path_buf());

    let handle_a = a.build(&[]).await.unwrap();
    let handle_b = b.build(&[]).await.unwrap();

    assert_ne!(handle_a.hash, handle_b.hash);
    assert_ne!(handle_a.local_archive_path, handle_b.local_archive_path);
}

#[tokio::test]
async fn changing_extension_set_changes_the_hash() {
    let cache_dir = tempfile::tempdir().unwrap();
    let ext_dir = tempfile::tempdir().unwrap();
    let builder = AgentBuilder::new(b"source".to_vec(), cache_dir.path().to_path_buf());

    let without_ext = builder.build(&[]).await.unwrap();
    let ping = write_extension(&ext_dir, "ping", b"return 1");
    let with_ext = builder.build(&[ping]).await.unwrap();

    assert_ne!(without_ext.hash, with_ext.hash);
}

#[tokio::test]
async fn a_failed_build_leaves_no_scratch_directory_behind() {
    let cache_dir = tempfile::tempdir().unwrap();
    let builder = AgentBuilder::new(b"source".to_vec(), cache_dir.path().to_path_buf());
    let missing = Extension { name: "missing".to_string(), path: cache_dir.path().join("does-not-exist.lua") };

    let result = builder.build(&[missing]).await;

    assert!(result.is_err());
    let leftovers: Vec<_> = std::fs::read_dir(cache_dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".build-"))
        .collect();
    assert!(leftovers.is_empty());
}
