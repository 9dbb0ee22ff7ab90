//! Discovery result caching
//!
//! Wraps [`EntityDiscovery`] with a keyed, TTL-bound cache. The cache is an
//! optimisation only: any store failure falls back to a live scan.

mod file;
mod store;

pub use file::FileCacheStore;
pub use store::{CacheError, CacheStore, MemoryCacheStore};

use crate::kind::DiscoveryRoot;
use crate::service::EntityDiscovery;
use panel_fs::checksum;
use std::sync::Arc;
use std::time::Duration;

/// Prefix of every discovery cache key.
pub const CACHE_KEY_PREFIX: &str = "panel.discovery";

/// [`EntityDiscovery`] with an optional cache in front of it.
#[derive(Clone)]
pub struct DiscoveryCache {
    discovery: EntityDiscovery,
    store: Option<Arc<dyn CacheStore>>,
    enabled: bool,
}

impl DiscoveryCache {
    /// A missing store behaves exactly like a disabled cache.
    pub fn new(discovery: EntityDiscovery, store: Option<Arc<dyn CacheStore>>, enabled: bool) -> Self {
        Self {
            discovery,
            store,
            enabled,
        }
    }

    pub fn discovery(&self) -> &EntityDiscovery {
        &self.discovery
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.store.is_some()
    }

    /// Cache key for a root: the kind name plus a digest of the scanned directory.
    pub fn cache_key(root: &DiscoveryRoot) -> String {
        format!(
            "{}.{}.{}",
            CACHE_KEY_PREFIX,
            root.kind().name,
            checksum::hex_digest(root.directory().as_str())
        )
    }

    /// Discover through the cache, storing fresh results for `ttl`.
    pub fn discover_cached(&self, root: &DiscoveryRoot, ttl: Duration) -> Vec<String> {
        let store = match &self.store {
            Some(store) if self.enabled => store,
            _ => return self.discovery.discover(root),
        };

        let key = Self::cache_key(root);
        match store.get(&key) {
            Ok(Some(cached)) => {
                tracing::debug!("Discovery cache hit for {}", key);
                return cached;
            }
            Ok(None) => tracing::debug!("Discovery cache miss for {}", key),
            Err(e) => {
                tracing::warn!("Discovery cache unavailable, scanning {} live: {}", root.directory(), e);
                return self.discovery.discover(root);
            }
        }

        let discovered = self.discovery.discover(root);
        if let Err(e) = store.put(&key, &discovered, ttl) {
            tracing::warn!("Failed to store discovery results for {}: {}", key, e);
        }
        discovered
    }

    /// Drop the cached entry for `root`. Returns whether one was removed.
    ///
    /// Store failures are swallowed: there is simply nothing to clear.
    pub fn clear(&self, root: &DiscoveryRoot) -> bool {
        let Some(store) = &self.store else {
            return false;
        };

        let key = Self::cache_key(root);
        match store.forget(&key) {
            Ok(removed) => removed,
            Err(e) => {
                tracing::debug!("Ignoring failure while clearing {}: {}", key, e);
                false
            }
        }
    }
}

impl std::fmt::Debug for DiscoveryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryCache")
            .field("enabled", &self.enabled)
            .field("has_store", &self.store.is_some())
            .finish()
    }
}
