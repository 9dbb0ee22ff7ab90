//! Engine configuration with layered overrides
//!
//! Configuration is merged from, in order:
//! 1. Global defaults (`<config_dir>/panel/config.toml`)
//! 2. Application config (`<root>/panel.toml`)
//! 3. Local overrides (`<root>/panel.local.toml`), meant to stay out of VCS
//!
//! Tables merge key by key; `[[manifests]]` entries accumulate across
//! layers; every other value is replaced by the later layer.
//!
//! ```toml
//! public_root = "web"
//!
//! [discovery]
//! cache_ttl_secs = 600
//! cache_dir = "storage/panel"
//!
//! [discovery.resources]
//! directory = "src/Admin/Resources"
//!
//! [components]
//! extensions = ["vue", "tsx"]
//!
//! [[manifests]]
//! package = "acme/charts"
//! manifest_url = "/vendor/acme-charts/manifest.json"
//! priority = 50
//! ```

use crate::{Error, Result};
use panel_components::ResolverConfig;
use panel_discovery::EntityKind;
use panel_fs::{ConfigStore, NormalizedPath};
use panel_manifest::RegistrationRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Application config file name.
pub const CONFIG_FILE: &str = "panel.toml";
/// Local override file name.
pub const LOCAL_CONFIG_FILE: &str = "panel.local.toml";

/// Partial override of an [`EntityKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindOverride {
    pub directory: Option<String>,
    pub namespace: Option<String>,
    pub extension: Option<String>,
    pub base: Option<String>,
}

impl KindOverride {
    pub fn apply(&self, mut kind: EntityKind) -> EntityKind {
        if let Some(directory) = &self.directory {
            kind = kind.with_directory(directory.as_str());
        }
        if let Some(namespace) = &self.namespace {
            kind = kind.with_namespace(namespace.as_str());
        }
        if let Some(extension) = &self.extension {
            kind = kind.with_extension(extension.as_str());
        }
        if let Some(base) = &self.base {
            kind.base = base.clone();
        }
        kind
    }
}

/// The `[discovery]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Scan conventional directories. When off, only explicitly registered
    /// entities are known.
    pub enabled: bool,
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    /// File-backed cache directory; an in-memory store is used when unset.
    pub cache_dir: Option<String>,
    pub resources: KindOverride,
    pub pages: KindOverride,
    pub cards: KindOverride,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_enabled: true,
            cache_ttl_secs: 3600,
            cache_dir: None,
            resources: KindOverride::default(),
            pages: KindOverride::default(),
            cards: KindOverride::default(),
        }
    }
}

impl DiscoverySettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn resource_kind(&self) -> EntityKind {
        self.resources.apply(EntityKind::resource())
    }

    pub fn page_kind(&self) -> EntityKind {
        self.pages.apply(EntityKind::page())
    }

    pub fn card_kind(&self) -> EntityKind {
        self.cards.apply(EntityKind::card())
    }
}

/// On-disk shape of a config layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    public_root: Option<String>,
    discovery: DiscoverySettings,
    components: ResolverConfig,
    manifests: Vec<RegistrationRequest>,
}

/// Effective engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub application_root: NormalizedPath,
    /// Root for `/`-prefixed manifest sources.
    pub public_root: NormalizedPath,
    pub discovery: DiscoverySettings,
    pub components: ResolverConfig,
    /// Registrations applied when the engine boots.
    pub manifests: Vec<RegistrationRequest>,
}

impl PanelConfig {
    /// Defaults rooted at `application_root`.
    pub fn new(application_root: impl Into<NormalizedPath>) -> Self {
        Self::from_file(application_root.into(), ConfigFile::default())
    }

    fn from_file(application_root: NormalizedPath, file: ConfigFile) -> Self {
        let public_root = resolve_path(&application_root, file.public_root.as_deref().unwrap_or("public"));
        let mut discovery = file.discovery;
        discovery.cache_dir = discovery
            .cache_dir
            .map(|dir| resolve_path(&application_root, &dir).to_string());

        Self {
            application_root,
            public_root,
            discovery,
            components: file.components,
            manifests: file.manifests,
        }
    }

    /// Resolved file-cache directory, if one is configured.
    pub fn cache_directory(&self) -> Option<NormalizedPath> {
        self.discovery.cache_dir.as_deref().map(NormalizedPath::new)
    }
}

/// Load the configuration for the application at `root`.
pub fn load_config(root: impl Into<NormalizedPath>) -> Result<PanelConfig> {
    ConfigLoader::new(root.into()).load()
}

/// Resolves configuration by merging the layers described in the module
/// docs.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: NormalizedPath,
    /// When `None`, `dirs::config_dir()` is used.
    global_config_dir_override: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            global_config_dir_override: None,
        }
    }

    /// Use `global_config_dir` instead of the platform config directory.
    pub fn with_global_config_dir(root: NormalizedPath, global_config_dir: PathBuf) -> Self {
        Self {
            root,
            global_config_dir_override: Some(global_config_dir),
        }
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join("panel"))
    }

    /// Paths of every layer, in merge order. Layers may not exist.
    pub fn layers(&self) -> Vec<NormalizedPath> {
        let mut layers = Vec::with_capacity(3);
        if let Some(global_dir) = self.global_config_dir() {
            layers.push(NormalizedPath::new(global_dir.join("config.toml")));
        }
        layers.push(self.root.join(CONFIG_FILE));
        layers.push(self.root.join(LOCAL_CONFIG_FILE));
        layers
    }

    /// Merge all present layers. Missing layers are skipped; a layer that
    /// fails to parse is an error.
    pub fn load(&self) -> Result<PanelConfig> {
        let mut merged = Value::Object(Default::default());
        let mut last_path = self.root.join(CONFIG_FILE);

        for path in self.layers() {
            if !path.is_file() {
                tracing::debug!(%path, "No config layer found, skipping");
                continue;
            }
            tracing::debug!(%path, "Loading config layer");
            let layer: Value = ConfigStore::new().load(&path)?;
            deep_merge_value(&mut merged, layer);
            last_path = path;
        }

        let file: ConfigFile = serde_json::from_value(merged).map_err(|e| Error::InvalidConfig {
            path: last_path.to_native(),
            message: e.to_string(),
        })?;
        Ok(PanelConfig::from_file(self.root.clone(), file))
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn has_config(&self) -> bool {
        self.root.join(CONFIG_FILE).is_file()
    }

    pub fn has_local_overrides(&self) -> bool {
        self.root.join(LOCAL_CONFIG_FILE).is_file()
    }
}

fn deep_merge_value(base: &mut Value, other: Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                let appendable = key == "manifests" && other_val.is_array();
                match base_map.get_mut(&key) {
                    Some(Value::Array(existing)) if appendable => {
                        if let Value::Array(more) = other_val {
                            existing.extend(more);
                        }
                    }
                    Some(base_val) => deep_merge_value(base_val, other_val),
                    None => {
                        base_map.insert(key, other_val);
                    }
                }
            }
        }
        (base, other) => {
            *base = other;
        }
    }
}

fn resolve_path(root: &NormalizedPath, path: &str) -> NormalizedPath {
    let normalized = NormalizedPath::new(path);
    let absolute = normalized.as_str().starts_with('/')
        || normalized.as_str().as_bytes().get(1) == Some(&b':');
    if absolute { normalized } else { root.join(path) }
}
