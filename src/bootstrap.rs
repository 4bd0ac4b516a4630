//! Composition root
//!
//! Turns a [`QuillConfig`] into a ready [`Renderer`]: default components,
//! extension catalogs merged over the built-in ones, fallback mode and
//! render limits applied. Runs once at startup; the registry is never
//! mutated after this returns.

use std::sync::Arc;

use crate::catalog::{business_catalog, merge_catalogs, standard_catalog, Catalog};
use crate::config::{FallbackMode, QuillConfig};
use crate::error::Result;
use crate::registry::{default_registry, ComponentRegistry, CoverageReport};
use crate::render::Renderer;

/// Build a renderer from configuration
pub fn bootstrap(config: &QuillConfig) -> Result<Renderer> {
    let registry = configure_registry((*default_registry()).clone(), config)?;
    Ok(Renderer::new(Arc::new(registry)).with_limits(config.limits()))
}

/// Apply `config` to an existing registry
pub fn configure_registry(mut registry: ComponentRegistry, config: &QuillConfig) -> Result<ComponentRegistry> {
    let mut catalog: Catalog = match registry.catalog() {
        Some(catalog) => (**catalog).clone(),
        None => merge_catalogs(&standard_catalog(), &business_catalog()),
    };
    for path in &config.catalogs {
        let extension = Catalog::from_file(path)?;
        tracing::debug!(
            catalog = %extension.id,
            components = extension.len(),
            "merging extension catalog"
        );
        catalog = merge_catalogs(&catalog, &extension);
    }
    registry.set_catalog(catalog);

    if config.fallback == FallbackMode::None {
        registry.clear_fallback();
    }

    if config.dev_mode {
        let report: CoverageReport = registry.validate_catalog_coverage();
        if report.is_complete() {
            tracing::debug!(components = registry.len(), "catalog coverage complete");
        } else {
            report.log_warnings();
        }
    }

    tracing::debug!(
        components = registry.len(),
        fallback = %config.fallback,
        max_depth = config.max_depth,
        "renderer configured"
    );
    Ok(registry)
}
