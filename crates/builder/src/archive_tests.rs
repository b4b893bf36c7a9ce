// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn pack_unpack_round_trips_entries_in_order() {
    let entries = vec![
        ArchiveEntry { name: "agent".to_string(), bytes: b"#!/bin/sh\necho hi".to_vec() },
        ArchiveEntry { name: "extensions/ping.lua".to_string(), bytes: b"return 1".to_vec() },
    ];
    let packed = pack(&entries).unwrap();
    let unpacked = unpack(&packed).unwrap();

    assert_eq!(unpacked.len(), 2);
    assert_eq!(unpacked[0].name, "agent");
    assert_eq!(unpacked[0].bytes, b"#!/bin/sh\necho hi");
    assert_eq!(unpacked[1].name, "extensions/ping.lua");
}

#[test]
fn empty_entry_list_round_trips() {
    let packed = pack(&[]).unwrap();
    let unpacked = unpack(&packed).unwrap();
    assert!(unpacked.is_empty());
}

#[test]
fn pack_output_is_zstd_compressed() {
    let entries =
        vec![ArchiveEntry { name: "agent".to_string(), bytes: vec![b'a'; 10_000] }];
    let packed = pack(&entries).unwrap();
    assert!(packed.len() < 10_000);
}

#[test]
fn unpack_rejects_truncated_input() {
    let entries = vec![ArchiveEntry { name: "agent".to_string(), bytes: b"hello".to_vec() }];
    let packed = pack(&entries).unwrap();
    let raw = zstd::stream::decode_all(&packed[..]).unwrap();
    let truncated = zstd::stream::encode_all(&raw[..raw.len() - 2], 3).unwrap();
    assert!(unpack(&truncated).is_err());
}
