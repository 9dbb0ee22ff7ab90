//! Manifest registrations submitted by extension packages
//!
//! Packages call into the registry on every boot with a loosely-typed
//! request (it may come straight from a JSON or TOML document), which is
//! validated into a [`ManifestRegistration`].
//!
//! ```json
//! { "package": "acme/charts", "manifest_url": "/vendor/acme-charts/manifest.json", "priority": 50 }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Priority assigned when a registration does not declare one.
pub const DEFAULT_PRIORITY: u64 = 100;

/// An unvalidated registration request.
///
/// `manifest_path` is the legacy spelling of `manifest_url`; exactly one of
/// the two must be set. `priority` is kept as a raw value so that negative
/// or fractional input can be reported precisely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub manifest_url: Option<String>,
    #[serde(default)]
    pub manifest_path: Option<String>,
    #[serde(default)]
    pub priority: Option<Value>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl RegistrationRequest {
    pub fn new(package: impl Into<String>, manifest_url: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            manifest_url: Some(manifest_url.into()),
            ..Self::default()
        }
    }

    /// Request using the legacy `manifest_path` field.
    pub fn legacy(package: impl Into<String>, manifest_path: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            manifest_path: Some(manifest_path.into()),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: u64) -> Self {
        self.priority = Some(Value::from(priority));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Read a request from an arbitrary JSON document.
    pub fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Validate and normalize into a [`ManifestRegistration`].
    pub fn validate(self) -> Result<ManifestRegistration> {
        let package = self
            .package
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or(Error::MissingPackage)?;

        let url = self.manifest_url.filter(|s| !s.trim().is_empty());
        let legacy = self.manifest_path.filter(|s| !s.trim().is_empty());
        let manifest_url = match (url, legacy) {
            (Some(url), None) => url,
            (None, Some(path)) => path,
            (Some(_), Some(_)) => return Err(Error::ConflictingManifestSource { package }),
            (None, None) => return Err(Error::MissingManifestSource { package }),
        };

        let priority = match self.priority {
            None | Some(Value::Null) => DEFAULT_PRIORITY,
            Some(value) => match value.as_u64() {
                Some(priority) => priority,
                None => {
                    return Err(Error::InvalidPriority {
                        package,
                        value: value.to_string(),
                    });
                }
            },
        };

        Ok(ManifestRegistration {
            package,
            manifest_url,
            priority,
            base_url: self.base_url.unwrap_or_default(),
        })
    }
}

/// A validated registration, keyed by its package identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRegistration {
    pub package: String,
    /// Canonical manifest source (path or URL).
    pub manifest_url: String,
    /// Lower values are consulted first.
    pub priority: u64,
    pub base_url: String,
}

impl TryFrom<RegistrationRequest> for ManifestRegistration {
    type Error = Error;

    fn try_from(request: RegistrationRequest) -> Result<Self> {
        request.validate()
    }
}
