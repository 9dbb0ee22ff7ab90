//! Views over discovered entities
//!
//! Grouping, lookup by key and navigation filtering are pure projections of
//! a discovered identifier list; they are shared by resources, pages and
//! cards.

use crate::catalog::TypeIntrospector;
use serde::Serialize;
use std::collections::BTreeMap;

/// Group name used for entities that declare none.
pub const DEFAULT_GROUP: &str = "Other";

/// A discovered type together with its resolved attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredEntity {
    pub identifier: String,
    pub key: String,
    pub label: String,
    pub group: Option<String>,
    pub navigable: bool,
}

impl DiscoveredEntity {
    /// Group name, falling back to [`DEFAULT_GROUP`].
    pub fn group_name(&self) -> &str {
        self.group.as_deref().unwrap_or(DEFAULT_GROUP)
    }
}

/// Ordered collection of discovered entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntityCollection {
    entities: Vec<DiscoveredEntity>,
}

impl EntityCollection {
    /// Resolve attributes for each identifier.
    ///
    /// Identifiers the introspector no longer knows (a stale cache entry,
    /// for instance) are dropped.
    pub fn from_identifiers<I, S>(identifiers: I, introspector: &dyn TypeIntrospector) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entities = identifiers
            .into_iter()
            .filter_map(|id| {
                let id = id.as_ref();
                let Some(descriptor) = introspector.introspect(id) else {
                    tracing::debug!("Dropping {}: no longer known to the type catalog", id);
                    return None;
                };
                Some(DiscoveredEntity {
                    key: descriptor.resolved_key(),
                    label: descriptor.resolved_label(),
                    group: descriptor.group.clone(),
                    navigable: descriptor.navigable,
                    identifier: descriptor.identifier,
                })
            })
            .collect();
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiscoveredEntity> {
        self.entities.iter()
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.identifier.as_str()).collect()
    }

    /// First entity whose key equals `key`.
    pub fn find_by_key(&self, key: &str) -> Option<&DiscoveredEntity> {
        self.entities.iter().find(|e| e.key == key)
    }

    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&DiscoveredEntity) -> bool,
    {
        Self {
            entities: self.entities.iter().filter(|e| predicate(e)).cloned().collect(),
        }
    }

    /// Entities that are navigable and pass the caller's authorization check.
    pub fn available_for_navigation<F>(&self, mut authorized: F) -> Self
    where
        F: FnMut(&DiscoveredEntity) -> bool,
    {
        self.filter(|e| e.navigable && authorized(e))
    }

    /// Entities grouped by group name, sorted by label within each group.
    ///
    /// Groups iterate in name order.
    pub fn grouped(&self) -> BTreeMap<String, Vec<DiscoveredEntity>> {
        let mut groups: BTreeMap<String, Vec<DiscoveredEntity>> = BTreeMap::new();
        for entity in &self.entities {
            groups
                .entry(entity.group_name().to_string())
                .or_default()
                .push(entity.clone());
        }
        for members in groups.values_mut() {
            members.sort_by(|a, b| a.label.cmp(&b.label));
        }
        groups
    }
}

impl IntoIterator for EntityCollection {
    type Item = DiscoveredEntity;
    type IntoIter = std::vec::IntoIter<DiscoveredEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntityCollection {
    type Item = &'a DiscoveredEntity;
    type IntoIter = std::slice::Iter<'a, DiscoveredEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
