// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::document::StateDocument;

#[test]
fn save_then_load_round_trips_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStateStore::new(dir.path().join("state.json"));
    let mut doc = StateDocument::new(1_000);
    doc.hosts.insert("alpha".to_string(), serde_json::json!({"os": "linux"}));

    store.save(&doc).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, doc);
}

#[test]
fn save_leaves_no_tmp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let store = JsonFileStateStore::new(&path);

    store.save(&StateDocument::new(1_000)).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn save_overwrites_a_previous_document_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStateStore::new(dir.path().join("state.json"));

    store.save(&StateDocument::new(1_000)).unwrap();
    let second = StateDocument::new(2_000);
    store.save(&second).unwrap();

    assert_eq!(store.load().unwrap(), second);
}

#[test]
fn load_fails_when_no_document_has_ever_been_saved() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStateStore::new(dir.path().join("missing.json"));
    assert!(store.load().is_err());
}

#[test]
fn exists_reflects_whether_a_state_file_is_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    assert!(!exists(&path));

    JsonFileStateStore::new(&path).save(&StateDocument::new(1_000)).unwrap();
    assert!(exists(&path));
}
