// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps a module name as it appears in an invocation to the thing that
//! should run it: a native handler, an external file, a shadowed native
//! implementation, or a terminal exclusion.

use ftl_core::{ModuleKind, NativeRegistry, ResolveError};

use crate::config::ResolverConfig;

pub struct Resolver {
    registry: NativeRegistry,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(registry: NativeRegistry, config: ResolverConfig) -> Self {
        Self { registry, config }
    }

    pub fn resolve(&self, name: &str) -> Result<ModuleKind, ResolveError> {
        if let Some(handle) = self.registry.get(name) {
            return Ok(ModuleKind::Native { handle });
        }

        if let Some(bare) = name.strip_prefix(&self.config.native_prefix) {
            if let Some(handle) = self.registry.get(bare) {
                return Ok(ModuleKind::Native { handle });
            }
        }

        let fqn = self.parse_fqn(name)?;

        if self.config.excluded.contains(&fqn) {
            return Ok(ModuleKind::Excluded {
                reason: format!("{fqn} requires side effects the controller cannot safely orchestrate"),
            });
        }

        if let Some(handle) = self.config.shadow_map.get(&fqn) {
            return Ok(ModuleKind::NativeShadowing { external_name: fqn, handle: handle.clone() });
        }

        let (namespace, collection, module) = split_fqn(&fqn);
        for root in &self.config.roots {
            for extension in &self.config.extensions {
                let candidate = root
                    .join("collections")
                    .join(namespace)
                    .join(collection)
                    .join("modules")
                    .join(format!("{module}.{extension}"));
                if candidate.is_file() {
                    return Ok(ModuleKind::External { path: candidate });
                }
            }
        }

        Err(ResolveError::NotFound(fqn))
    }

    /// Names registered in the native registry, for `ftl modules list`.
    pub fn native_names(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    /// Walks every configured root for `collections/<ns>/<coll>/modules/*.<ext>`
    /// files and returns their fully-qualified names, for `ftl modules list`.
    /// Best-effort: unreadable directories are skipped rather than failing
    /// the whole scan.
    pub fn discover_external(&self) -> Vec<String> {
        let mut found = Vec::new();
        for root in &self.config.roots {
            let collections_dir = root.join("collections");
            let Ok(namespaces) = std::fs::read_dir(&collections_dir) else { continue };
            for namespace_entry in namespaces.flatten() {
                let namespace = namespace_entry.file_name();
                let Ok(collections) = std::fs::read_dir(namespace_entry.path()) else { continue };
                for collection_entry in collections.flatten() {
                    let collection = collection_entry.file_name();
                    let modules_dir = collection_entry.path().join("modules");
                    let Ok(modules) = std::fs::read_dir(&modules_dir) else { continue };
                    for module_entry in modules.flatten() {
                        let path = module_entry.path();
                        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
                        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
                        if !self.config.extensions.iter().any(|ext| ext == extension) {
                            continue;
                        }
                        found.push(format!(
                            "{}.{}.{stem}",
                            namespace.to_string_lossy(),
                            collection.to_string_lossy()
                        ));
                    }
                }
            }
        }
        found.sort();
        found.dedup();
        found
    }

    fn parse_fqn(&self, name: &str) -> Result<String, ResolveError> {
        let tokens: Vec<&str> = name.split('.').collect();
        match tokens.as_slice() {
            [single] => {
                Ok(format!("{}.{}.{single}", self.config.builtin_namespace, self.config.builtin_collection))
            }
            [_, _, _] => Ok(name.to_string()),
            _ => Err(ResolveError::MalformedName(name.to_string())),
        }
    }
}

fn split_fqn(fqn: &str) -> (&str, &str, &str) {
    let mut parts = fqn.splitn(3, '.');
    let namespace = parts.next().unwrap_or_default();
    let collection = parts.next().unwrap_or_default();
    let module = parts.next().unwrap_or_default();
    (namespace, collection, module)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
