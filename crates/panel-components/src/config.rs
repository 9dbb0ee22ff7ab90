//! Resolver configuration

use panel_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

/// Where and how component files are looked up.
///
/// Directory fields are relative to the application root unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Prefix marking user-extensible components (custom pages).
    pub custom_prefix: String,
    /// Host-application directory holding custom page components.
    pub app_directory: String,
    /// Directory that `import_alias` points at.
    pub import_root: String,
    /// Bundler alias used in generated import paths.
    pub import_alias: String,
    /// Components shipped with the engine itself.
    pub package_directory: String,
    /// Accepted component file extensions; the first one is canonical.
    pub extensions: Vec<String>,
    /// Scaffolding command suggested when a custom page is missing.
    pub generator_command: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            custom_prefix: "Pages/".to_string(),
            app_directory: "resources/js/Pages".to_string(),
            import_root: "resources/js".to_string(),
            import_alias: "@".to_string(),
            package_directory: "vendor/panel/resources/js".to_string(),
            extensions: vec!["vue".to_string()],
            generator_command: "panel make:page".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Extension used for expected paths in fallback results.
    pub fn canonical_extension(&self) -> &str {
        self.extensions.first().map(String::as_str).unwrap_or("vue")
    }

    /// Extensions to probe, never empty.
    pub(crate) fn probe_extensions(&self) -> Vec<&str> {
        if self.extensions.is_empty() {
            vec![self.canonical_extension()]
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.'))
                .collect()
        }
    }

    pub(crate) fn locate(root: &NormalizedPath, directory: &str) -> NormalizedPath {
        if directory.starts_with('/') || is_windows_absolute(directory) {
            NormalizedPath::new(directory)
        } else {
            root.join(directory)
        }
    }
}

fn is_windows_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && matches!(bytes[2], b'/' | b'\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.custom_prefix, "Pages/");
        assert_eq!(config.canonical_extension(), "vue");
    }

    #[test]
    fn test_empty_extensions_fall_back_to_vue() {
        let config = ResolverConfig {
            extensions: vec![],
            ..ResolverConfig::default()
        };
        assert_eq!(config.probe_extensions(), vec!["vue"]);
    }

    #[test]
    fn test_locate_absolute_and_relative() {
        let root = NormalizedPath::new("/srv/app");
        assert_eq!(ResolverConfig::locate(&root, "/opt/panel").as_str(), "/opt/panel");
        assert_eq!(ResolverConfig::locate(&root, "C:\\panel").as_str(), "C:/panel");
        assert_eq!(ResolverConfig::locate(&root, "resources/js").as_str(), "/srv/app/resources/js");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ResolverConfig = serde_json::from_str(r#"{"extensions": ["tsx", "jsx"]}"#).unwrap();
        assert_eq!(config.canonical_extension(), "tsx");
        assert_eq!(config.custom_prefix, "Pages/");
    }
}
