//! Manifest content model
//!
//! Two document shapes are accepted:
//!
//! ```json
//! { "Pages/Reports": "assets/reports.js" }
//! ```
//!
//! ```json
//! { "components": { "Pages/Reports": { "file": "assets/reports.js", "useFallback": false } } }
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Top-level key that may wrap the component mapping.
pub const WRAPPER_KEY: &str = "components";

/// Keys consulted, in order, for the asset path of a detailed descriptor.
const PATH_KEYS: [&str; 3] = ["file", "path", "src"];

/// Physical asset a manifest declares for a component name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssetDescriptor {
    /// Plain file reference.
    Path(String),
    /// Object form, passed through verbatim.
    Detailed(DetailedAsset),
}

/// Object-form descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailedAsset {
    /// The package declares the component but defers to the host's files.
    #[serde(rename = "useFallback", skip_serializing_if = "std::ops::Not::not")]
    pub use_fallback: bool,
    /// Remaining descriptor fields.
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl DetailedAsset {
    /// Split the fallback flag (`useFallback` or `use_fallback`) from the rest.
    pub fn from_map(mut data: Map<String, Value>) -> Self {
        let flag = data
            .remove("useFallback")
            .into_iter()
            .chain(data.remove("use_fallback"))
            .any(|v| v.as_bool().unwrap_or(false));
        Self {
            use_fallback: flag,
            data,
        }
    }
}

impl AssetDescriptor {
    /// File reference, if the descriptor carries one.
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path.as_str()),
            Self::Detailed(detailed) => PATH_KEYS
                .iter()
                .find_map(|key| detailed.data.get(*key).and_then(Value::as_str)),
        }
    }

    pub fn uses_fallback(&self) -> bool {
        matches!(self, Self::Detailed(detailed) if detailed.use_fallback)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(path) => Some(Self::Path(path)),
            Value::Object(map) => Some(Self::Detailed(DetailedAsset::from_map(map))),
            _ => None,
        }
    }
}

impl From<&str> for AssetDescriptor {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl PartialEq<&str> for AssetDescriptor {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::Path(path) if path == other)
    }
}

/// Component name to asset mapping, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ManifestContent {
    components: IndexMap<String, AssetDescriptor>,
}

impl ManifestContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build content from a parsed document of either shape.
    ///
    /// Anything that is not an object yields empty content; entries whose
    /// descriptor is neither a string nor an object are skipped.
    pub fn from_value(document: Value) -> Self {
        let Value::Object(mut top) = document else {
            tracing::warn!("Manifest document is not a JSON object, treating it as empty");
            return Self::default();
        };

        let components = match top.remove(WRAPPER_KEY) {
            Some(Value::Object(wrapped)) => wrapped,
            Some(other) => {
                top.insert(WRAPPER_KEY.to_string(), other);
                top
            }
            None => top,
        };

        let mut content = Self::default();
        for (name, descriptor) in components {
            match AssetDescriptor::from_value(descriptor) {
                Some(asset) => {
                    content.components.insert(name, asset);
                }
                None => tracing::warn!("Skipping manifest entry '{}': unsupported descriptor", name),
            }
        }
        content
    }

    pub fn insert(&mut self, name: impl Into<String>, asset: AssetDescriptor) {
        self.components.insert(name.into(), asset);
    }

    pub fn get(&self, name: &str) -> Option<&AssetDescriptor> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetDescriptor)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, AssetDescriptor)> for ManifestContent {
    fn from_iter<I: IntoIterator<Item = (String, AssetDescriptor)>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}
