//! Component manifests for the panel engine.
//!
//! The host application and any number of extension packages register
//! manifests mapping logical component names to physical assets. This
//! crate validates those registrations, loads manifest files leniently,
//! and answers "which package provides this component?".

pub mod aggregate;
pub mod content;
pub mod error;
pub mod loader;
pub mod registration;
pub mod registry;

pub use aggregate::{AggregatedManifest, ComponentMatch, PackageManifest};
pub use content::{AssetDescriptor, DetailedAsset, ManifestContent};
pub use error::{Error, Result};
pub use loader::{ManifestLoader, ManifestLocation};
pub use registration::{DEFAULT_PRIORITY, ManifestRegistration, RegistrationRequest};
pub use registry::{ManifestRegistry, RegistryStats};
