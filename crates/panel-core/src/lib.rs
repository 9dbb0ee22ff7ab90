//! # panel-core
//!
//! Boots the panel engine for one application: loads the layered
//! configuration, installs logging on request, and exposes the [`Panel`]
//! facade over discovery, manifests and component resolution.

pub mod config;
pub mod error;
pub mod logging;
pub mod panel;

pub use config::{ConfigLoader, DiscoverySettings, KindOverride, PanelConfig, load_config};
pub use error::{Error, Result};
pub use panel::Panel;

pub use panel_components::{ComponentResolver, Resolution, ResolverConfig};
pub use panel_discovery::{
    CacheStore, DiscoveredEntity, EntityCollection, EntityKind, TypeCatalog, TypeDescriptor, TypeIntrospector,
};
pub use panel_manifest::{AggregatedManifest, ManifestRegistration, RegistrationRequest};
