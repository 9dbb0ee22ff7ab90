//! Manifest registry
//!
//! Extension packages register their component manifests here during boot.
//! Registrations are keyed by package identifier and kept in registration
//! order; enumeration sorts them by priority. The aggregated view is
//! memoized and dropped on every mutation.

use crate::aggregate::{AggregatedManifest, ComponentMatch, PackageManifest};
use crate::error::Result;
use crate::loader::ManifestLoader;
use crate::registration::{ManifestRegistration, RegistrationRequest};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Summary counters over the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub packages: usize,
    pub components: usize,
    /// Packages whose manifest loaded no components, in priority order.
    pub empty_packages: Vec<String>,
}

/// Registry of component manifests.
#[derive(Debug)]
pub struct ManifestRegistry {
    loader: ManifestLoader,
    registrations: RwLock<IndexMap<String, ManifestRegistration>>,
    aggregate: Mutex<Option<Arc<AggregatedManifest>>>,
}

impl ManifestRegistry {
    pub fn new(loader: ManifestLoader) -> Self {
        Self {
            loader,
            registrations: RwLock::new(IndexMap::new()),
            aggregate: Mutex::new(None),
        }
    }

    pub fn loader(&self) -> &ManifestLoader {
        &self.loader
    }

    /// Validate and store a registration, replacing any previous one for
    /// the same package.
    pub fn register(&self, request: RegistrationRequest) -> Result<()> {
        let registration = request.validate()?;
        tracing::info!(
            "Registered manifest for '{}' (priority {})",
            registration.package,
            registration.priority
        );
        self.registrations
            .write()
            .insert(registration.package.clone(), registration);
        self.invalidate();
        Ok(())
    }

    /// Register several packages; nothing is stored unless all are valid.
    pub fn register_all(&self, requests: impl IntoIterator<Item = RegistrationRequest>) -> Result<()> {
        let validated = requests
            .into_iter()
            .map(RegistrationRequest::validate)
            .collect::<Result<Vec<_>>>()?;

        {
            let mut registrations = self.registrations.write();
            for registration in validated {
                registrations.insert(registration.package.clone(), registration);
            }
        }
        self.invalidate();
        Ok(())
    }

    /// Remove a registration. Returns whether it existed.
    pub fn unregister(&self, package: &str) -> bool {
        let removed = self.registrations.write().shift_remove(package).is_some();
        self.invalidate();
        removed
    }

    /// Remove every registration.
    pub fn clear(&self) {
        self.registrations.write().clear();
        self.invalidate();
    }

    /// Forget loaded manifest content so the next read goes back to disk.
    pub fn refresh(&self) {
        self.invalidate();
    }

    fn invalidate(&self) {
        *self.aggregate.lock() = None;
    }

    /// All registrations, ascending by priority.
    ///
    /// The sort is stable: equal priorities keep registration order.
    pub fn manifests(&self) -> Vec<ManifestRegistration> {
        let mut manifests: Vec<ManifestRegistration> = self.registrations.read().values().cloned().collect();
        manifests.sort_by_key(|m| m.priority);
        manifests
    }

    /// The aggregated view, rebuilt if a mutation invalidated it.
    ///
    /// Every registered package appears, even when its manifest failed to
    /// load.
    pub fn aggregated(&self) -> Arc<AggregatedManifest> {
        let mut cell = self.aggregate.lock();
        if let Some(aggregate) = cell.as_ref() {
            return Arc::clone(aggregate);
        }

        let mut aggregate = AggregatedManifest::default();
        for registration in self.manifests() {
            let components = self.loader.load(&registration);
            aggregate.push(
                registration.package,
                PackageManifest {
                    base_url: registration.base_url,
                    priority: registration.priority,
                    components,
                },
            );
        }

        let aggregate = Arc::new(aggregate);
        *cell = Some(Arc::clone(&aggregate));
        aggregate
    }

    /// First registration, in priority order, whose manifest declares `name`.
    pub fn resolve_component(&self, name: &str) -> Option<ComponentMatch> {
        self.aggregated().find(name)
    }

    pub fn get(&self, package: &str) -> Option<ManifestRegistration> {
        self.registrations.read().get(package).cloned()
    }

    pub fn contains(&self, package: &str) -> bool {
        self.registrations.read().contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    /// Whether any registered manifest declares `name`.
    pub fn has_component(&self, name: &str) -> bool {
        self.aggregated().iter().any(|(_, m)| m.components.contains(name))
    }

    /// Number of components per package, in priority order.
    pub fn component_counts(&self) -> IndexMap<String, usize> {
        self.aggregated()
            .iter()
            .map(|(package, m)| (package.to_string(), m.components.len()))
            .collect()
    }

    pub fn stats(&self) -> RegistryStats {
        let aggregate = self.aggregated();
        let mut stats = RegistryStats {
            packages: aggregate.len(),
            ..RegistryStats::default()
        };
        for (package, manifest) in aggregate.iter() {
            stats.components += manifest.components.len();
            if manifest.components.is_empty() {
                stats.empty_packages.push(package.to_string());
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn registry() -> ManifestRegistry {
        ManifestRegistry::new(ManifestLoader::new("/nonexistent/app", "/nonexistent/app/public"))
    }

    fn request(package: &str, priority: u64) -> RegistrationRequest {
        RegistrationRequest::new(package, format!("{package}.json")).with_priority(priority)
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = registry();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.aggregated().is_empty());
    }

    #[test]
    fn test_manifests_sorted_by_priority() {
        let registry = registry();
        registry.register(request("low", 300)).unwrap();
        registry.register(request("high", 50)).unwrap();
        registry.register(request("medium", 150)).unwrap();

        let order: Vec<String> = registry.manifests().into_iter().map(|m| m.package).collect();
        assert_eq!(order, vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_equal_priorities_keep_registration_order() {
        let registry = registry();
        for package in ["c", "a", "b"] {
            registry.register(request(package, 100)).unwrap();
        }

        let order: Vec<String> = registry.manifests().into_iter().map(|m| m.package).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_invalid_registration_is_not_stored() {
        let registry = registry();
        let err = registry
            .register(RegistrationRequest::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingPackage));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_all_is_all_or_nothing() {
        let registry = registry();
        let result = registry.register_all([request("good", 1), RegistrationRequest::legacy("bad", "")]);

        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister() {
        let registry = registry();
        registry.register(request("p", 1)).unwrap();

        assert!(registry.unregister("p"));
        assert!(!registry.unregister("p"));
        assert!(!registry.contains("p"));
    }

    #[test]
    fn test_missing_manifest_still_aggregated() {
        let registry = registry();
        registry.register(request("ghost", 1)).unwrap();

        let aggregate = registry.aggregated();
        assert!(aggregate.contains("ghost"));
        assert!(aggregate.get("ghost").unwrap().components.is_empty());
        assert_eq!(registry.stats().empty_packages, vec!["ghost"]);
    }

    #[test]
    fn test_aggregate_is_memoized_until_mutation() {
        let registry = registry();
        registry.register(request("a", 1)).unwrap();

        let first = registry.aggregated();
        assert!(Arc::ptr_eq(&first, &registry.aggregated()));

        registry.register(request("b", 2)).unwrap();
        let second = registry.aggregated();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }
}
