// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateMetadata {
    pub version: u32,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

/// Run-to-run persisted state: per-host facts and per-resource records,
/// opaque to the core beyond the envelope it reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateDocument {
    pub metadata: StateMetadata,
    #[serde(default)]
    pub hosts: HashMap<String, Value>,
    #[serde(default)]
    pub resources: HashMap<String, Value>,
}

impl StateDocument {
    pub fn new(created_at_ms: u64) -> Self {
        Self {
            metadata: StateMetadata {
                version: CURRENT_VERSION,
                created_at_ms,
                updated_at_ms: created_at_ms,
            },
            hosts: HashMap::new(),
            resources: HashMap::new(),
        }
    }
}
