//! Component resolver
//!
//! Resolution order for a logical name:
//!
//! 1. registered manifests, by priority (first match wins)
//! 2. custom-prefixed names: the host application's page directory
//! 3. the engine's bundled components
//! 4. custom-prefixed names only: a fallback result with guidance
//!
//! A manifest entry flagged `useFallback` (or without an asset path)
//! declares the component but defers to steps 2-4.

use crate::config::ResolverConfig;
use crate::resolution::Resolution;
use panel_fs::{NormalizedPath, files_with_extension};
use panel_manifest::ManifestRegistry;
use std::sync::Arc;

/// Maps logical component names to physical assets.
#[derive(Debug, Clone)]
pub struct ComponentResolver {
    registry: Arc<ManifestRegistry>,
    application_root: NormalizedPath,
    config: ResolverConfig,
}

impl ComponentResolver {
    pub fn new(
        registry: Arc<ManifestRegistry>,
        application_root: impl Into<NormalizedPath>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            registry,
            application_root: application_root.into(),
            config,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ManifestRegistry> {
        &self.registry
    }

    /// Directory holding the host application's custom pages.
    pub fn app_directory(&self) -> NormalizedPath {
        ResolverConfig::locate(&self.application_root, &self.config.app_directory)
    }

    /// Directory holding the engine's bundled components.
    pub fn package_directory(&self) -> NormalizedPath {
        ResolverConfig::locate(&self.application_root, &self.config.package_directory)
    }

    fn import_root(&self) -> NormalizedPath {
        ResolverConfig::locate(&self.application_root, &self.config.import_root)
    }

    /// Resolve `name` to a physical asset. Never fails.
    pub fn resolve(&self, name: &str) -> Resolution {
        if let Some(resolution) = self.from_manifest(name) {
            return resolution;
        }

        match self.strip_custom_prefix(name) {
            Some(stripped) => {
                if let Some(path) = self.find_app_file(stripped) {
                    tracing::debug!("Component '{}' resolved from application at {}", name, path);
                    let import_path = self.import_path_for(&path);
                    return Resolution::App { path, import_path };
                }
                let candidates = self.package_candidates(name, Some(stripped));
                if let Some(path) = first_existing(&candidates) {
                    tracing::debug!("Component '{}' resolved from bundled package at {}", name, path);
                    return Resolution::Package { path };
                }
                self.fallback(name, stripped)
            }
            None => {
                let candidates = self.package_candidates(name, None);
                if let Some(path) = first_existing(&candidates) {
                    tracing::debug!("Component '{}' resolved from bundled package at {}", name, path);
                    return Resolution::Package { path };
                }
                // Built-in components are expected to ship with the engine.
                let path = candidates
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| self.package_directory().join(name));
                tracing::warn!("Bundled component '{}' not found, expected at {}", name, path);
                Resolution::Package { path }
            }
        }
    }

    /// Import path for `name` if it resolves to a host-application file.
    pub fn import_path(&self, name: &str) -> Option<String> {
        match self.resolve(name) {
            Resolution::App { import_path, .. } => Some(import_path),
            _ => None,
        }
    }

    /// Whether the host application provides `name`.
    ///
    /// The custom prefix is optional: `Pages/Reports` and `Reports` both
    /// look for `<app_directory>/Reports.<ext>`.
    pub fn app_component_exists(&self, name: &str) -> bool {
        let stripped = self.strip_custom_prefix(name).unwrap_or(name);
        self.find_app_file(stripped).is_some()
    }

    /// Every custom page in the host application, sorted, with the custom
    /// prefix applied. Nested directories are kept as `/`-separated names.
    pub fn available_app_components(&self) -> Vec<String> {
        let directory = self.app_directory();
        let mut names: Vec<String> = files_with_extension(&directory, &self.config.probe_extensions())
            .iter()
            .filter_map(|path| path.relative_to(&directory))
            .map(|relative| format!("{}{}", self.config.custom_prefix, strip_extension(&relative)))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    fn from_manifest(&self, name: &str) -> Option<Resolution> {
        let found = self.registry.resolve_component(name)?;
        if found.asset.uses_fallback() {
            tracing::debug!(
                "Component '{}' declared by '{}' defers to application files",
                name,
                found.package
            );
            return None;
        }
        let Some(asset) = found.asset.asset_path().map(str::to_string) else {
            tracing::debug!(
                "Component '{}' declared by '{}' has no asset path, continuing",
                name,
                found.package
            );
            return None;
        };
        let url = found.url().unwrap_or_else(|| asset.clone());
        tracing::debug!("Component '{}' resolved from manifest of '{}'", name, found.package);
        Some(Resolution::Manifest {
            asset,
            descriptor: found.asset,
            base_url: found.base_url,
            package: found.package,
            priority: found.priority,
            url,
        })
    }

    fn strip_custom_prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        let prefix = self.config.custom_prefix.as_str();
        if prefix.is_empty() {
            return None;
        }
        name.strip_prefix(prefix).filter(|rest| !rest.is_empty())
    }

    fn find_app_file(&self, stripped: &str) -> Option<NormalizedPath> {
        let directory = self.app_directory();
        let candidates: Vec<NormalizedPath> = self
            .config
            .probe_extensions()
            .into_iter()
            .map(|ext| directory.join(&format!("{stripped}.{ext}")))
            .collect();
        first_existing(&candidates)
    }

    /// Bundled candidates: the full name, the name without the custom
    /// prefix, and the stripped name under `Pages/`.
    fn package_candidates(&self, name: &str, stripped: Option<&str>) -> Vec<NormalizedPath> {
        let base = stripped.unwrap_or(name);
        let mut stems = vec![name.to_string(), base.to_string(), format!("Pages/{base}")];
        let mut seen = std::collections::HashSet::new();
        stems.retain(|stem| seen.insert(stem.clone()));

        let directory = self.package_directory();
        let extensions = self.config.probe_extensions();
        stems
            .iter()
            .flat_map(|stem| {
                extensions
                    .iter()
                    .map(|ext| directory.join(&format!("{stem}.{ext}")))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn import_path_for(&self, path: &NormalizedPath) -> String {
        match path.relative_to(&self.import_root()) {
            Some(relative) if self.config.import_alias.is_empty() => relative,
            Some(relative) => format!("{}/{}", self.config.import_alias.trim_end_matches('/'), relative),
            None => path
                .relative_to(&self.application_root)
                .unwrap_or_else(|| path.to_string()),
        }
    }

    fn fallback(&self, name: &str, stripped: &str) -> Resolution {
        let expected_path = self
            .app_directory()
            .join(&format!("{stripped}.{}", self.config.canonical_extension()));
        let relative = expected_path
            .relative_to(&self.application_root)
            .unwrap_or_else(|| expected_path.to_string());

        let mut suggestions = vec![
            format!("Create {relative}"),
            format!("Run `{} {}` to scaffold it", self.config.generator_command, stripped),
        ];
        let available = self.available_app_components();
        if !available.is_empty() {
            suggestions.push(format!("Available custom pages: {}", available.join(", ")));
        }

        tracing::warn!("Custom page '{}' not found, expected at {}", name, expected_path);
        Resolution::Fallback {
            expected_path,
            suggestions,
            error: format!("Component '{name}' was not found"),
            help: format!(
                "Create {relative} or register a manifest that provides '{name}'"
            ),
        }
    }
}

fn first_existing(candidates: &[NormalizedPath]) -> Option<NormalizedPath> {
    candidates.iter().find(|path| path.is_file()).cloned()
}

fn strip_extension(relative: &str) -> &str {
    match relative.rfind('.') {
        Some(dot) if !relative[dot..].contains('/') => &relative[..dot],
        _ => relative,
    }
}
