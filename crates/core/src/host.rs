// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Addressable automation targets.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_SSH_PORT: u16 = 22;

/// A host reachable by the scheduler, either directly (local) or through an agent session.
///
/// Immutable once constructed; cloned freely across chunk tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub vars: HashMap<String, Value>,
}

fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

impl Host {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            port: DEFAULT_SSH_PORT,
            user: None,
            key: None,
            vars: HashMap::new(),
        }
    }

    /// True iff `name` or `address` match the loopback set.
    pub fn is_local(&self) -> bool {
        is_loopback(&self.name) || is_loopback(&self.address)
    }
}

fn is_loopback(s: &str) -> bool {
    matches!(s, "localhost" | "127.0.0.1" | "::1")
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
