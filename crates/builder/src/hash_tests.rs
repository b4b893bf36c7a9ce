// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn hash_is_sixteen_hex_chars() {
    let hash = archive_hash(b"source bytes", &[]);
    assert_eq!(hash.len(), 16);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn different_source_gives_different_hash() {
    let a = archive_hash(b"one", &[]);
    let b = archive_hash(b"two", &[]);
    assert_ne!(a, b);
}

#[test]
fn different_extension_set_gives_different_hash() {
    let a = archive_hash(b"source", &[]);
    let b = archive_hash(b"source", &["ping".to_string()]);
    assert_ne!(a, b);
}

#[test]
fn hash_is_stable_for_the_same_inputs() {
    let names = vec!["a".to_string(), "b".to_string()];
    assert_eq!(archive_hash(b"source", &names), archive_hash(b"source", &names));
}

#[test]
fn extension_order_matters_since_callers_must_pre_sort() {
    let forward = vec!["a".to_string(), "b".to_string()];
    let backward = vec!["b".to_string(), "a".to_string()];
    assert_ne!(archive_hash(b"source", &forward), archive_hash(b"source", &backward));
}
