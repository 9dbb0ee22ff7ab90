//! Extension type discovery for the panel engine.
//!
//! Finds resource, page and card types that applications and extension
//! packages drop into conventional directories, validates them against a
//! [`TypeIntrospector`], and caches the results.

pub mod cache;
pub mod catalog;
pub mod entities;
pub mod kind;
pub mod naming;
pub mod service;

pub use cache::{CacheError, CacheStore, DiscoveryCache, FileCacheStore, MemoryCacheStore};
pub use catalog::{TypeCatalog, TypeDescriptor, TypeIntrospector};
pub use entities::{DEFAULT_GROUP, DiscoveredEntity, EntityCollection};
pub use kind::{DiscoveryRoot, EntityKind};
pub use service::EntityDiscovery;
