//! Quill - declarative node renderer for the article-writing dashboard
//!
//! A producer describes UI as plain data (a node tree). Quill resolves each
//! node's `type` through a prioritized component registry, renders it into
//! host primitives, and turns user interactions back into serializable
//! `(action, args)` intents for one host-supplied handler.
//!
//! ```text
//!  node tree ──▶ Renderer ──▶ ComponentRegistry ──▶ Component ──▶ HostOutput
//!     ▲             │  resolve(type): registered │ fallback │ nothing   │
//!     │             └──────────── render_children ◀────────────────────┘
//!     │                                                                 │
//!  producer ◀── ActionHandler::on_action(action, args) ◀── interaction ─┘
//! ```
//!
//! The [`catalog`] documents what each type should look like and drives
//! development-time validation; it never gates rendering.

pub mod bootstrap;
pub mod business;
pub mod catalog;
pub mod components;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod host;
pub mod node;
pub mod registry;
pub mod render;
pub mod tui;

pub use bootstrap::bootstrap;
pub use catalog::{
    add_component_to_catalog, catalog_has_component, create_catalog, get_component_definition, merge_catalogs,
    Catalog, CatalogEntry, NodeValidator, PropertyDefinition, PropertyKind, ValidationReport,
};
pub use config::{FallbackMode, QuillConfig};
pub use dashboard::{Dashboard, SharedDashboard, TaskStatus};
pub use error::{FixSuggestion, QuillError, Result};
pub use host::{HostElement, HostEvent, HostOutput, Listener, Primitive};
pub use node::{parse_forest, Action, ActionHandler, ActionLog, Node, NodeInput, SharedActionHandler};
pub use registry::{
    create_registry, default_registry, set_default_registry, ComponentRegistry, RegisterOptions, RegistrySource,
    PRIORITY_CUSTOM, PRIORITY_OVERRIDE, PRIORITY_STANDARD,
};
pub use render::{render, Component, RenderContext, RenderLimits, Renderer};
