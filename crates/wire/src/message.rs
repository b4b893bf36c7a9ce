// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire message types exchanged between controller and agent.

use ftl_core::{ArgMap, Diff};
use serde::{Deserialize, Serialize};

/// One controller↔agent wire message. The `type` field selects the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Agent→controller, exactly one, first frame of a session.
    Hello { version: String, pid: u32 },
    /// Controller→agent: run a module by its resolved external name.
    Module {
        name: String,
        #[serde(default)]
        args: ArgMap,
        #[serde(default)]
        check_mode: bool,
    },
    /// Controller→agent: run a module that the controller resolved to a
    /// native handler it wants executed inside the agent process instead
    /// (used when the remote side also ships the native registry).
    FtlModule {
        name: String,
        #[serde(default)]
        args: ArgMap,
        #[serde(default)]
        check_mode: bool,
    },
    /// Controller→agent: capability probe request.
    Info,
    /// Agent→controller: capability probe response.
    InfoResponse {
        #[serde(default)]
        capabilities: serde_json::Value,
    },
    /// Agent→controller, zero or more, interleaved before the result.
    Event { event: String, message: String },
    /// Agent→controller, exactly one per request.
    #[serde(rename = "result")]
    Outcome(WireResult),
    /// Controller→agent: terminates the session. No body fields.
    Shutdown,
}

/// Body of a `result` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResult {
    pub changed: bool,
    pub failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<Diff>,
}

impl Message {
    pub fn is_hello(&self) -> bool {
        matches!(self, Message::Hello { .. })
    }

    pub fn is_event(&self) -> bool {
        matches!(self, Message::Event { .. })
    }

    pub fn is_outcome(&self) -> bool {
        matches!(self, Message::Outcome(_))
    }

    /// Short name used in session-layer `ProtocolError::Unexpected` diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Message::Hello { .. } => "hello",
            Message::Module { .. } => "module",
            Message::FtlModule { .. } => "ftl_module",
            Message::Info => "info",
            Message::InfoResponse { .. } => "info_response",
            Message::Event { .. } => "event",
            Message::Outcome(_) => "result",
            Message::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
