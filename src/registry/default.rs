//! Process-wide default registry
//!
//! Built lazily on first use, exactly once. Readers take an `Arc` snapshot;
//! the composition root may swap in a configured registry at startup.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::ComponentRegistry;
use crate::business::register_business_components;
use crate::catalog::{business_catalog, merge_catalogs, standard_catalog};
use crate::components::register_standard_components;
use crate::render::PlaceholderComponent;

static DEFAULT_REGISTRY: Lazy<RwLock<Arc<ComponentRegistry>>> = Lazy::new(|| {
    let registry = build_default_registry();
    tracing::debug!(components = registry.len(), "default registry initialized");
    RwLock::new(Arc::new(registry))
});

/// Standard primitives, business components, placeholder fallback and the
/// merged standard + business catalog
pub fn build_default_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    register_standard_components(&mut registry);
    register_business_components(&mut registry);
    registry.set_fallback(Arc::new(PlaceholderComponent));
    registry.set_catalog(merge_catalogs(&standard_catalog(), &business_catalog()));
    registry
}

/// Snapshot of the current default registry
pub fn default_registry() -> Arc<ComponentRegistry> {
    Arc::clone(&DEFAULT_REGISTRY.read())
}

/// Replace the default registry (composition root only)
pub fn set_default_registry(registry: ComponentRegistry) {
    tracing::debug!(components = registry.len(), "default registry replaced");
    *DEFAULT_REGISTRY.write() = Arc::new(registry);
}
