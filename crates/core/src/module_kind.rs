// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolver output and the in-process native module registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::cancel::CancelSignal;
use crate::invocation::ModuleInvocation;
use crate::result::ModuleResult;

/// Opaque handle to a native module, shareable across runner tasks.
pub type NativeHandle = Arc<dyn NativeModule>;

/// A module implemented in-process, callable without shipping anything to an agent.
#[async_trait]
pub trait NativeModule: Send + Sync {
    /// Stable name this module is registered under, e.g. `"ftl_noop"`.
    fn name(&self) -> &str;

    /// Run the module. Implementations must check `cancel` at any suspension
    /// point and return promptly once it trips.
    async fn call(
        &self,
        invocation: &ModuleInvocation,
        cancel: &CancelSignal,
    ) -> ModuleResult;
}

/// Classification produced by the module resolver, consumed by the runner layer.
#[derive(Clone)]
pub enum ModuleKind {
    /// Callable in-process.
    Native { handle: NativeHandle },
    /// An external name silently redirected to a native handler.
    NativeShadowing { external_name: String, handle: NativeHandle },
    /// Code file to be shipped to the agent.
    External { path: std::path::PathBuf },
    /// Refusal to execute; terminal, no fallback.
    Excluded { reason: String },
}

impl std::fmt::Debug for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleKind::Native { handle } => {
                f.debug_struct("Native").field("name", &handle.name()).finish()
            }
            ModuleKind::NativeShadowing { external_name, handle } => f
                .debug_struct("NativeShadowing")
                .field("external_name", external_name)
                .field("name", &handle.name())
                .finish(),
            ModuleKind::External { path } => f.debug_struct("External").field("path", path).finish(),
            ModuleKind::Excluded { reason } => {
                f.debug_struct("Excluded").field("reason", reason).finish()
            }
        }
    }
}

/// Resolution failures shared by every caller of the resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("malformed module name: {0}")]
    MalformedName(String),
    #[error("module not found: {0}")]
    NotFound(String),
}

/// Process-wide immutable map of always-available native handlers.
///
/// Populated once at startup (`ftl_noop`, `ftl_ping`, `ftl_command` by
/// default) and consulted by the resolver before anything touches the
/// filesystem.
#[derive(Clone, Default)]
pub struct NativeRegistry {
    modules: HashMap<String, NativeHandle>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: NativeHandle) {
        self.modules.insert(module.name().to_string(), module);
    }

    pub fn get(&self, name: &str) -> Option<NativeHandle> {
        self.modules.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "module_kind_tests.rs"]
mod tests;
