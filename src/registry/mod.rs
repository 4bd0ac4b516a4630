//! Component Registry
//!
//! Runtime table from node type to the component that renders it. Several
//! independently written modules register into one namespace, so conflicts
//! are settled by an explicit numeric priority rather than by registration
//! order:
//!
//! | Tier       | Priority | Source     |
//! |------------|----------|------------|
//! | standard   | 0        | `standard` |
//! | extensions | 10       | `custom`   |
//! | override   | 100      | `override` |
//!
//! A registration takes effect only when the type is absent or the new
//! priority is greater than or equal to the existing one. Lookups never
//! fail: an unknown type resolves to the fallback, or to nothing when no
//! fallback is configured.

mod default;

pub use default::{build_default_registry, default_registry, set_default_registry};

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::render::Component;

pub const PRIORITY_STANDARD: i32 = 0;
pub const PRIORITY_CUSTOM: i32 = 10;
pub const PRIORITY_OVERRIDE: i32 = 100;

/// Where a registration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrySource {
    #[default]
    Standard,
    Custom,
    Override,
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrySource::Standard => write!(f, "standard"),
            RegistrySource::Custom => write!(f, "custom"),
            RegistrySource::Override => write!(f, "override"),
        }
    }
}

/// Options for [`ComponentRegistry::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterOptions {
    pub priority: i32,
    pub source: RegistrySource,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self {
            priority: PRIORITY_STANDARD,
            source: RegistrySource::Standard,
        }
    }
}

impl RegisterOptions {
    pub fn new(priority: i32, source: RegistrySource) -> Self {
        Self { priority, source }
    }

    /// Extension tier: priority 10, source `custom`
    pub fn custom() -> Self {
        Self::new(PRIORITY_CUSTOM, RegistrySource::Custom)
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// One row of the registry table
#[derive(Clone)]
pub struct RegistryEntry {
    pub component: Arc<dyn Component>,
    pub priority: i32,
    pub source: RegistrySource,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("priority", &self.priority)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Outcome of a lookup, saying which path was taken
#[derive(Clone)]
pub enum Resolution {
    Registered(Arc<dyn Component>),
    Fallback(Arc<dyn Component>),
    Unresolved,
}

impl Resolution {
    pub fn component(&self) -> Option<&Arc<dyn Component>> {
        match self {
            Resolution::Registered(c) | Resolution::Fallback(c) => Some(c),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback(_))
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Registered(_) => write!(f, "Registered"),
            Resolution::Fallback(_) => write!(f, "Fallback"),
            Resolution::Unresolved => write!(f, "Unresolved"),
        }
    }
}

/// Catalog vs registry diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Documented but not implemented
    pub missing: Vec<String>,
    /// Implemented but not documented
    pub extra: Vec<String>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }

    pub fn log_warnings(&self) {
        for node_type in &self.missing {
            tracing::warn!(node_type = %node_type, "catalog type has no registered component");
        }
        for node_type in &self.extra {
            tracing::warn!(node_type = %node_type, "registered component is not in the catalog");
        }
    }
}

/// Node type → component table with priority resolution and a fallback
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    entries: HashMap<String, RegistryEntry>,
    catalog: Option<Arc<Catalog>>,
    fallback: Option<Arc<dyn Component>>,
}

/// Empty registry: no entries, no catalog, no fallback
pub fn create_registry() -> ComponentRegistry {
    ComponentRegistry::new()
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` for `node_type`
    ///
    /// Takes effect only if the type is absent or `options.priority` is
    /// greater than or equal to the current entry's. Returns whether it did.
    pub fn register(
        &mut self,
        node_type: impl Into<String>,
        component: Arc<dyn Component>,
        options: RegisterOptions,
    ) -> bool {
        let node_type = node_type.into();

        if let Some(existing) = self.entries.get(&node_type) {
            if options.priority < existing.priority {
                tracing::debug!(
                    node_type = %node_type,
                    existing = existing.priority,
                    rejected = options.priority,
                    "registration ignored, lower priority"
                );
                return false;
            }
            if options.priority == existing.priority {
                tracing::debug!(
                    node_type = %node_type,
                    priority = options.priority,
                    previous = %existing.source,
                    next = %options.source,
                    "equal priority registration replaces existing"
                );
            }
        }

        tracing::debug!(node_type = %node_type, priority = options.priority, source = %options.source, "component registered");
        self.entries.insert(
            node_type,
            RegistryEntry {
                component,
                priority: options.priority,
                source: options.source,
            },
        );
        true
    }

    /// Replace unconditionally at [`PRIORITY_OVERRIDE`]
    pub fn override_component(&mut self, node_type: impl Into<String>, component: Arc<dyn Component>) {
        let node_type = node_type.into();
        tracing::debug!(node_type = %node_type, "component overridden");
        self.entries.insert(
            node_type,
            RegistryEntry {
                component,
                priority: PRIORITY_OVERRIDE,
                source: RegistrySource::Override,
            },
        );
    }

    /// Remove the entry; later lookups fall back
    pub fn unregister(&mut self, node_type: &str) -> Option<RegistryEntry> {
        self.entries.remove(node_type)
    }

    /// Registered component, else the fallback, else `None`
    pub fn get(&self, node_type: &str) -> Option<Arc<dyn Component>> {
        self.resolve(node_type).component().cloned()
    }

    pub fn resolve(&self, node_type: &str) -> Resolution {
        if let Some(entry) = self.entries.get(node_type) {
            return Resolution::Registered(Arc::clone(&entry.component));
        }
        match &self.fallback {
            Some(fallback) => Resolution::Fallback(Arc::clone(fallback)),
            None => Resolution::Unresolved,
        }
    }

    pub fn entry(&self, node_type: &str) -> Option<&RegistryEntry> {
        self.entries.get(node_type)
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.entries.contains_key(node_type)
    }

    /// Registered type names, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_fallback(&mut self, component: Arc<dyn Component>) {
        self.fallback = Some(component);
    }

    pub fn clear_fallback(&mut self) {
        self.fallback = None;
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn set_catalog(&mut self, catalog: impl Into<Arc<Catalog>>) {
        self.catalog = Some(catalog.into());
    }

    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.catalog.as_ref()
    }

    /// Diff catalog types against registered types
    ///
    /// Purely diagnostic. With no catalog set both lists are empty.
    pub fn validate_catalog_coverage(&self) -> CoverageReport {
        let Some(catalog) = &self.catalog else {
            return CoverageReport::default();
        };

        let documented: BTreeSet<&str> = catalog.components.keys().map(String::as_str).collect();
        let implemented: BTreeSet<&str> = self.entries.keys().map(String::as_str).collect();

        CoverageReport {
            missing: documented.difference(&implemented).map(|s| s.to_string()).collect(),
            extra: implemented.difference(&documented).map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.types())
            .field("catalog", &self.catalog.as_ref().map(|c| c.id.as_str()))
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
