//! Resolution results
//!
//! Serialized with a `type` tag so the frontend can branch on the source:
//!
//! ```json
//! { "type": "app", "path": "/srv/app/resources/js/Pages/Reports.vue", "import_path": "@/Pages/Reports.vue" }
//! ```

use panel_fs::NormalizedPath;
use panel_manifest::AssetDescriptor;
use serde::Serialize;

/// Where a logical component name resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resolution {
    /// Declared by a registered manifest.
    Manifest {
        /// Asset path inside the package.
        asset: String,
        /// Raw descriptor from the manifest.
        descriptor: AssetDescriptor,
        base_url: String,
        package: String,
        priority: u64,
        /// `base_url` joined with `asset`.
        url: String,
    },
    /// A custom page in the host application.
    App {
        path: NormalizedPath,
        import_path: String,
    },
    /// A component bundled with the engine.
    Package { path: NormalizedPath },
    /// A custom page that could not be found anywhere.
    Fallback {
        expected_path: NormalizedPath,
        suggestions: Vec<String>,
        error: String,
        help: String,
    },
}

impl Resolution {
    /// Short tag matching the serialized `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::Manifest { .. } => "manifest",
            Resolution::App { .. } => "app",
            Resolution::Package { .. } => "package",
            Resolution::Fallback { .. } => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback { .. })
    }

    /// Bundler import path, only present for host-application components.
    pub fn import_path(&self) -> Option<&str> {
        match self {
            Resolution::App { import_path, .. } => Some(import_path.as_str()),
            _ => None,
        }
    }

    /// Filesystem path of the resolved or expected file, if any.
    pub fn path(&self) -> Option<&NormalizedPath> {
        match self {
            Resolution::App { path, .. } | Resolution::Package { path } => Some(path),
            Resolution::Fallback { expected_path, .. } => Some(expected_path),
            Resolution::Manifest { .. } => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
