//! Manifest source resolution and loading
//!
//! Source strings are interpreted as:
//!
//! ```text
//! https://cdn.example.com/manifest.json   remote (recognized, not fetched)
//! /vendor/acme/manifest.json              relative to the public root
//! vendor/acme/dist/manifest.json          relative to the application root
//! ```

use crate::content::ManifestContent;
use crate::registration::ManifestRegistration;
use panel_fs::{NormalizedPath, io};

/// Where a manifest source points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLocation {
    Remote(String),
    File(NormalizedPath),
}

/// Loads manifest content without ever failing.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    application_root: NormalizedPath,
    public_root: NormalizedPath,
}

impl ManifestLoader {
    pub fn new(application_root: impl Into<NormalizedPath>, public_root: impl Into<NormalizedPath>) -> Self {
        Self {
            application_root: application_root.into(),
            public_root: public_root.into(),
        }
    }

    /// Loader whose public root is `<application_root>/public`.
    pub fn for_application(application_root: impl Into<NormalizedPath>) -> Self {
        let application_root = application_root.into();
        let public_root = application_root.join("public");
        Self {
            application_root,
            public_root,
        }
    }

    pub fn application_root(&self) -> &NormalizedPath {
        &self.application_root
    }

    pub fn public_root(&self) -> &NormalizedPath {
        &self.public_root
    }

    pub fn locate(&self, source: &str) -> ManifestLocation {
        let lower = source.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return ManifestLocation::Remote(source.trim().to_string());
        }

        if source.starts_with('/') || source.starts_with('\\') {
            ManifestLocation::File(self.public_root.join(source))
        } else {
            ManifestLocation::File(self.application_root.join(source))
        }
    }

    /// Parse a manifest document.
    pub fn parse(text: &str) -> Result<ManifestContent, serde_json::Error> {
        let document: serde_json::Value = serde_json::from_str(text)?;
        Ok(ManifestContent::from_value(document))
    }

    /// Load the components declared by `registration`.
    ///
    /// Remote sources, missing files, unreadable files and malformed JSON
    /// all produce empty content.
    pub fn load(&self, registration: &ManifestRegistration) -> ManifestContent {
        let path = match self.locate(&registration.manifest_url) {
            ManifestLocation::Remote(url) => {
                tracing::warn!(
                    "Remote manifest {} for '{}' is not supported yet, no components loaded",
                    url,
                    registration.package
                );
                return ManifestContent::default();
            }
            ManifestLocation::File(path) => path,
        };

        if !path.is_file() {
            tracing::warn!("Manifest for '{}' not found at {}", registration.package, path);
            return ManifestContent::default();
        }

        let text = match io::read_text(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to read manifest for '{}': {}", registration.package, e);
                return ManifestContent::default();
            }
        };

        match Self::parse(&text) {
            Ok(content) => {
                tracing::debug!(
                    "Loaded {} component(s) for '{}' from {}",
                    content.len(),
                    registration.package,
                    path
                );
                content
            }
            Err(e) => {
                tracing::warn!("Malformed manifest for '{}' at {}: {}", registration.package, path, e);
                ManifestContent::default()
            }
        }
    }
}
