//! Entity kinds and discovery roots

use panel_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

/// Describes one discoverable category of extension type.
///
/// Resources, pages and cards differ only in the values carried here; the
/// discovery algorithm is the same for all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityKind {
    /// Short name used in logs and cache keys (e.g. "resource").
    pub name: String,
    /// Identifier of the contract every discovered type must satisfy.
    pub base: String,
    /// File extension of candidate files, without the dot.
    pub extension: String,
    /// Directory scanned for candidates, relative to the application root.
    pub directory: String,
    /// Namespace that replaces the first path segment during translation.
    pub namespace: String,
}

impl EntityKind {
    pub fn new(
        name: impl Into<String>,
        base: impl Into<String>,
        directory: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            extension: "rs".to_string(),
            directory: directory.into(),
            namespace: "App".to_string(),
        }
    }

    pub fn resource() -> Self {
        Self::new("resource", "Panel::Resource", "app/Panel/Resources")
    }

    pub fn page() -> Self {
        Self::new("page", "Panel::Page", "app/Panel/Pages")
    }

    pub fn card() -> Self {
        Self::new("card", "Panel::Card", "app/Panel/Cards")
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }
}

/// A directory to scan, paired with the kind of entity expected there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRoot {
    application_root: NormalizedPath,
    kind: EntityKind,
}

impl DiscoveryRoot {
    pub fn new(application_root: impl Into<NormalizedPath>, kind: EntityKind) -> Self {
        Self {
            application_root: application_root.into(),
            kind,
        }
    }

    pub fn application_root(&self) -> &NormalizedPath {
        &self.application_root
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Absolute directory scanned for this root.
    pub fn directory(&self) -> NormalizedPath {
        self.application_root.join(&self.kind.directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_kinds_differ_only_in_data() {
        let kinds = [EntityKind::resource(), EntityKind::page(), EntityKind::card()];
        for kind in &kinds {
            assert_eq!(kind.extension, "rs");
            assert_eq!(kind.namespace, "App");
            assert!(kind.directory.starts_with("app/Panel/"));
        }
        assert_eq!(kinds[0].base, "Panel::Resource");
        assert_eq!(kinds[1].base, "Panel::Page");
        assert_eq!(kinds[2].base, "Panel::Card");
    }

    #[test]
    fn test_with_extension_strips_dot() {
        let kind = EntityKind::page().with_extension(".page");
        assert_eq!(kind.extension, "page");
    }

    #[test]
    fn test_root_directory() {
        let root = DiscoveryRoot::new("/srv/app", EntityKind::card());
        assert_eq!(root.directory().as_str(), "/srv/app/app/Panel/Cards");
    }
}
