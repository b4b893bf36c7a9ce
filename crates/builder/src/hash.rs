// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content hashing for cache-key computation.

use sha2::{Digest, Sha256};

/// First 16 hex chars of SHA-256 over `source` followed by each name in
/// `sorted_extension_names`, in order. Callers must sort the names first —
/// this function does not sort them — so the hash is stable regardless of
/// the order extensions were requested in.
pub fn archive_hash(source: &[u8], sorted_extension_names: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source);
    for name in sorted_extension_names {
        hasher.update(name.as_bytes());
    }
    let digest = hasher.finalize();
    hex::encode(digest)[..16].to_string()
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
