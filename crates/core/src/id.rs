// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run correlation identifier.

/// Identifies one scheduler execution, used to namespace archive uploads and
/// logs. Fixed-size and `Copy`: a 4-byte prefix plus a 19-character nanoid,
/// 23 bytes total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId {
    buf: [u8; Self::LEN],
}

impl RunId {
    pub const PREFIX: &'static str = "run-";
    const LEN: usize = 23;

    pub fn new() -> Self {
        let id = format!("{}{}", Self::PREFIX, nanoid::nanoid!(19));
        debug_assert_eq!(id.len(), Self::LEN);
        let mut buf = [0u8; Self::LEN];
        buf.copy_from_slice(id.as_bytes());
        Self { buf }
    }

    pub fn as_str(&self) -> &str {
        // Invariant: only ever built from the ASCII prefix plus a nanoid.
        match std::str::from_utf8(&self.buf) {
            Ok(s) => s,
            Err(_) => unreachable!("RunId constructed from non-UTF-8"),
        }
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
