//! Type catalog and capability checks
//!
//! Discovery only sees files. Whether a candidate identifier names a usable
//! type is answered by a [`TypeIntrospector`]; extension crates describe the
//! types they ship by registering [`TypeDescriptor`]s in a [`TypeCatalog`]
//! at boot, once, and discovery consults it afterwards.

use crate::naming;
use heck::{ToKebabCase, ToTitleCase};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Everything discovery needs to know about one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Fully qualified identifier (e.g. `App::Panel::Resources::Users`).
    pub identifier: String,
    /// Abstract types are never returned by discovery.
    pub is_abstract: bool,
    /// Contracts this type implements directly.
    pub implements: BTreeSet<String>,
    /// Parent type, whose contracts are inherited.
    pub parent: Option<String>,
    /// Unique lookup key; defaults to the kebab-cased basename.
    pub key: Option<String>,
    /// Display label; defaults to the title-cased basename.
    pub label: Option<String>,
    /// Navigation group; entities without one land in the default group.
    pub group: Option<String>,
    /// Whether the entity should be offered in navigation.
    pub navigable: bool,
}

impl TypeDescriptor {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            is_abstract: false,
            implements: BTreeSet::new(),
            parent: None,
            key: None,
            label: None,
            group: None,
            navigable: true,
        }
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn implements(mut self, contract: impl Into<String>) -> Self {
        self.implements.insert(contract.into());
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.navigable = false;
        self
    }

    /// The declared key, or the kebab-cased basename.
    pub fn resolved_key(&self) -> String {
        self.key
            .clone()
            .unwrap_or_else(|| naming::basename(&self.identifier).to_kebab_case())
    }

    /// The declared label, or the title-cased basename.
    pub fn resolved_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| naming::basename(&self.identifier).to_title_case())
    }
}

/// Answers "does this identifier name a loadable type, and what is it?".
pub trait TypeIntrospector: Send + Sync {
    /// Look up a type by its fully qualified identifier.
    fn introspect(&self, identifier: &str) -> Option<TypeDescriptor>;

    /// Whether `identifier` is concrete and satisfies `base`.
    ///
    /// A type satisfies `base` when it is `base`, implements it, or
    /// inherits it through its parent chain. Unknown identifiers and
    /// parent cycles fail the check.
    fn satisfies(&self, identifier: &str, base: &str) -> bool {
        let Some(start) = self.introspect(identifier) else {
            return false;
        };
        if start.is_abstract {
            return false;
        }

        let mut visited = HashSet::new();
        let mut current = start;
        loop {
            if current.identifier == base || current.implements.contains(base) {
                return true;
            }
            if !visited.insert(current.identifier.clone()) {
                tracing::debug!("Parent cycle detected at {}", current.identifier);
                return false;
            }
            let Some(parent) = current.parent.as_deref() else {
                return false;
            };
            if parent == base {
                return true;
            }
            match self.introspect(parent) {
                Some(next) => current = next,
                None => return false,
            }
        }
    }
}

/// In-memory [`TypeIntrospector`] populated at boot.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any previous descriptor with the same identifier.
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        self.types.insert(descriptor.identifier.clone(), descriptor);
    }

    pub fn register_all(&mut self, descriptors: impl IntoIterator<Item = TypeDescriptor>) {
        for descriptor in descriptors {
            self.register(descriptor);
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.types.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeIntrospector for TypeCatalog {
    fn introspect(&self, identifier: &str) -> Option<TypeDescriptor> {
        self.types.get(identifier).cloned()
    }
}
