//! Directory scanning for extension types

use crate::catalog::TypeIntrospector;
use crate::kind::DiscoveryRoot;
use crate::naming;
use panel_fs::files_with_extension;
use std::collections::HashSet;
use std::sync::Arc;

/// Scans discovery roots and keeps the candidates that name valid types.
///
/// Discovery is best-effort: a missing directory, a file whose identifier
/// is unknown, an abstract type or a type of the wrong kind all simply
/// produce fewer results.
#[derive(Clone)]
pub struct EntityDiscovery {
    introspector: Arc<dyn TypeIntrospector>,
}

impl EntityDiscovery {
    pub fn new(introspector: Arc<dyn TypeIntrospector>) -> Self {
        Self { introspector }
    }

    pub fn introspector(&self) -> &Arc<dyn TypeIntrospector> {
        &self.introspector
    }

    /// Discover every valid, distinct type identifier under `root`.
    ///
    /// Results follow directory walk order (file names sorted per directory).
    pub fn discover(&self, root: &DiscoveryRoot) -> Vec<String> {
        let kind = root.kind();
        let directory = root.directory();

        if !directory.is_dir() {
            tracing::debug!("Discovery root {} does not exist, nothing to discover", directory);
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut discovered = Vec::new();

        for file in files_with_extension(&directory, &[kind.extension.as_str()]) {
            let Some(relative) = file.relative_to(root.application_root()) else {
                tracing::debug!("Skipping {} outside the application root", file);
                continue;
            };

            let identifier = naming::translate(&relative, &kind.namespace);
            if !seen.insert(identifier.clone()) {
                continue;
            }

            if self.introspector.satisfies(&identifier, &kind.base) {
                discovered.push(identifier);
            } else {
                tracing::debug!(
                    "Ignoring {} ({}): not a concrete {}",
                    identifier,
                    relative,
                    kind.base
                );
            }
        }

        tracing::debug!(
            "Discovered {} {} type(s) under {}",
            discovered.len(),
            kind.name,
            directory
        );
        discovered
    }
}

impl std::fmt::Debug for EntityDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDiscovery").finish_non_exhaustive()
    }
}
