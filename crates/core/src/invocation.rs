// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module invocation requests.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// String-keyed argument mapping passed to a module.
pub type ArgMap = HashMap<String, Value>;

/// `(name, args, dry_run)` — what to run and with what arguments.
///
/// `name` is a dotted string resolved by `ftl-resolver`: a bare identifier, a
/// native-prefixed identifier, or a three-part fully-qualified name `ns.coll.mod`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInvocation {
    pub name: String,
    #[serde(default)]
    pub args: ArgMap,
    #[serde(default, rename = "check_mode")]
    pub dry_run: bool,
}

impl ModuleInvocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), args: ArgMap::new(), dry_run: false }
    }

    pub fn with_args(mut self, args: ArgMap) -> Self {
        self.args = args;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
