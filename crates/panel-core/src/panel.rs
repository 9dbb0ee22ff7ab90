//! Registration facade
//!
//! `Panel` wires discovery, manifests and component resolution together for
//! one application. Hosts build it once at boot and query it per request.

use crate::Result;
use crate::config::{PanelConfig, load_config};
use panel_components::{ComponentResolver, Resolution};
use panel_discovery::{
    CacheStore, DiscoveredEntity, DiscoveryCache, DiscoveryRoot, EntityCollection, EntityDiscovery, EntityKind,
    FileCacheStore, MemoryCacheStore, TypeIntrospector,
};
use panel_fs::NormalizedPath;
use panel_manifest::{AggregatedManifest, ManifestLoader, ManifestRegistration, ManifestRegistry, RegistrationRequest};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// The engine facade for one application.
pub struct Panel {
    config: PanelConfig,
    introspector: Arc<dyn TypeIntrospector>,
    cache: DiscoveryCache,
    registry: Arc<ManifestRegistry>,
    resolver: ComponentResolver,
    /// Explicitly registered identifiers, keyed by kind name.
    registered: RwLock<HashMap<String, Vec<String>>>,
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Panel {
    /// Build the engine and apply the registrations listed in the config.
    pub fn new(config: PanelConfig, introspector: Arc<dyn TypeIntrospector>) -> Result<Self> {
        let store: Arc<dyn CacheStore> = match config.cache_directory() {
            Some(directory) => Arc::new(FileCacheStore::new(directory)),
            None => Arc::new(MemoryCacheStore::new()),
        };
        let cache = DiscoveryCache::new(
            EntityDiscovery::new(Arc::clone(&introspector)),
            Some(store),
            config.discovery.cache_enabled,
        );

        let loader = ManifestLoader::new(config.application_root.clone(), config.public_root.clone());
        let registry = Arc::new(ManifestRegistry::new(loader));
        registry.register_all(config.manifests.iter().cloned())?;

        let resolver = ComponentResolver::new(
            Arc::clone(&registry),
            config.application_root.clone(),
            config.components.clone(),
        );

        tracing::info!(
            root = %config.application_root,
            manifests = registry.len(),
            discovery = config.discovery.enabled,
            "Panel engine ready"
        );

        Ok(Self {
            config,
            introspector,
            cache,
            registry,
            resolver,
            registered: RwLock::new(HashMap::new()),
        })
    }

    /// Load the layered config for `root` and build the engine.
    pub fn boot(root: impl Into<NormalizedPath>, introspector: Arc<dyn TypeIntrospector>) -> Result<Self> {
        Self::new(load_config(root)?, introspector)
    }

    /// Replace the discovery cache store.
    pub fn with_cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache = DiscoveryCache::new(
            EntityDiscovery::new(Arc::clone(&self.introspector)),
            Some(store),
            self.config.discovery.cache_enabled,
        );
        self
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn introspector(&self) -> &Arc<dyn TypeIntrospector> {
        &self.introspector
    }

    pub fn resource_kind(&self) -> EntityKind {
        self.config.discovery.resource_kind()
    }

    pub fn page_kind(&self) -> EntityKind {
        self.config.discovery.page_kind()
    }

    pub fn card_kind(&self) -> EntityKind {
        self.config.discovery.card_kind()
    }

    fn kinds(&self) -> [EntityKind; 3] {
        [self.resource_kind(), self.page_kind(), self.card_kind()]
    }

    fn root_for(&self, kind: &EntityKind) -> DiscoveryRoot {
        DiscoveryRoot::new(self.config.application_root.clone(), kind.clone())
    }

    /// Every known entity of `kind`: discovered ones first, then explicit
    /// registrations not already found.
    pub fn entities(&self, kind: &EntityKind) -> EntityCollection {
        let mut identifiers = if self.config.discovery.enabled {
            self.cache
                .discover_cached(&self.root_for(kind), self.config.discovery.cache_ttl())
        } else {
            Vec::new()
        };

        if let Some(explicit) = self.registered.read().get(&kind.name) {
            for identifier in explicit {
                if !identifiers.contains(identifier) {
                    identifiers.push(identifier.clone());
                }
            }
        }

        EntityCollection::from_identifiers(identifiers, self.introspector.as_ref())
    }

    pub fn resources(&self) -> EntityCollection {
        self.entities(&self.resource_kind())
    }

    pub fn pages(&self) -> EntityCollection {
        self.entities(&self.page_kind())
    }

    pub fn cards(&self) -> EntityCollection {
        self.entities(&self.card_kind())
    }

    /// Register identifiers of `kind` explicitly.
    ///
    /// Identifiers that do not satisfy the kind's base contract are
    /// rejected. Returns how many were accepted.
    pub fn register_entities<I, S>(&self, kind: &EntityKind, identifiers: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registered = self.registered.write();
        let entry = registered.entry(kind.name.clone()).or_default();
        let mut accepted = 0;
        for identifier in identifiers {
            let identifier = identifier.into();
            if !self.introspector.satisfies(&identifier, &kind.base) {
                tracing::warn!("Not registering {}: it does not satisfy {}", identifier, kind.base);
                continue;
            }
            if !entry.contains(&identifier) {
                entry.push(identifier);
            }
            accepted += 1;
        }
        accepted
    }

    /// Drop cached discovery results for every kind.
    pub fn clear_cache(&self) {
        for kind in self.kinds() {
            if self.cache.clear(&self.root_for(&kind)) {
                tracing::debug!("Cleared discovery cache for {}", kind.name);
            }
        }
    }

    pub fn find_resource(&self, key: &str) -> Option<DiscoveredEntity> {
        self.resources().find_by_key(key).cloned()
    }

    pub fn find_page(&self, key: &str) -> Option<DiscoveredEntity> {
        self.pages().find_by_key(key).cloned()
    }

    pub fn find_card(&self, key: &str) -> Option<DiscoveredEntity> {
        self.cards().find_by_key(key).cloned()
    }

    /// Resources by navigation group, each group sorted by label.
    pub fn grouped_resources(&self) -> BTreeMap<String, Vec<DiscoveredEntity>> {
        self.resources().grouped()
    }

    /// Navigable resources the caller is authorized to see.
    pub fn navigable_resources<F>(&self, authorized: F) -> EntityCollection
    where
        F: FnMut(&DiscoveredEntity) -> bool,
    {
        self.resources().available_for_navigation(authorized)
    }

    pub fn register_manifest(&self, request: RegistrationRequest) -> Result<()> {
        self.registry.register(request)?;
        Ok(())
    }

    pub fn unregister_manifest(&self, package: &str) -> bool {
        self.registry.unregister(package)
    }

    pub fn manifests(&self) -> Vec<ManifestRegistration> {
        self.registry.manifests()
    }

    pub fn aggregated_manifest(&self) -> Arc<AggregatedManifest> {
        self.registry.aggregated()
    }

    pub fn manifest_registry(&self) -> &Arc<ManifestRegistry> {
        &self.registry
    }

    pub fn resolve_component(&self, name: &str) -> Resolution {
        self.resolver.resolve(name)
    }

    pub fn component_resolver(&self) -> &ComponentResolver {
        &self.resolver
    }
}
