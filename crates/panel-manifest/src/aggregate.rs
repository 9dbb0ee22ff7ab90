//! Aggregated manifest view
//!
//! The namespace-preserving union of every registered manifest, keyed by
//! package and ordered by priority. Serialized, it is the lookup table the
//! frontend receives:
//!
//! ```json
//! { "acme/charts": { "base_url": "/vendor/acme", "priority": 50, "components": { "Pages/Chart": "chart.js" } } }
//! ```

use crate::content::{AssetDescriptor, ManifestContent};
use indexmap::IndexMap;
use serde::Serialize;

/// One package's entry in the aggregated view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackageManifest {
    pub base_url: String,
    pub priority: u64,
    pub components: ManifestContent,
}

/// Every registered package, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregatedManifest {
    packages: IndexMap<String, PackageManifest>,
}

impl AggregatedManifest {
    pub(crate) fn push(&mut self, package: String, manifest: PackageManifest) {
        self.packages.insert(package, manifest);
    }

    pub fn get(&self, package: &str) -> Option<&PackageManifest> {
        self.packages.get(package)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PackageManifest)> {
        self.packages.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First package, in priority order, that declares `name`.
    pub fn find(&self, name: &str) -> Option<ComponentMatch> {
        self.packages.iter().find_map(|(package, manifest)| {
            manifest.components.get(name).map(|asset| ComponentMatch {
                package: package.clone(),
                priority: manifest.priority,
                base_url: manifest.base_url.clone(),
                asset: asset.clone(),
            })
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// A component found in a registered manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentMatch {
    pub package: String,
    pub priority: u64,
    pub base_url: String,
    pub asset: AssetDescriptor,
}

impl ComponentMatch {
    /// Public URL of the asset: the base URL joined with the asset path.
    pub fn url(&self) -> Option<String> {
        let asset = self.asset.asset_path()?;
        if self.base_url.is_empty() {
            return Some(asset.to_string());
        }
        Some(format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            asset.trim_start_matches('/')
        ))
    }
}
