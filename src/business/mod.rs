//! Business components for the article dashboard
//!
//! Registered through the same `register` call as the generic primitives,
//! at the extension tier (priority 10, source `custom`). `table` replaces
//! the generic table; the rest are new types.
//!
//! Some of these components keep internal state (draft text, pagination
//! cursors, a collapsed sidebar). That state lives in the component,
//! keyed by node id, never in the node data: a tree handed to the renderer
//! stays plain, serializable data.

mod modals;
mod shell;
mod table;
mod task_form;

pub use modals::{ArticleEditor, ConfirmDialog};
pub use shell::AppShell;
pub use table::TaskTable;
pub use task_form::TaskForm;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::host::{HostOutput, Primitive};
use crate::registry::{ComponentRegistry, RegisterOptions};
use crate::render::{Component, RenderContext};

/// Types registered by [`register_business_components`]
pub const BUSINESS_TYPES: &[&str] = &[
    "appShell",
    "table",
    "confirmDialog",
    "articleEditor",
    "taskForm",
    "statusBadge",
];

/// Register every business component at the extension tier
pub fn register_business_components(registry: &mut ComponentRegistry) {
    let components: [(&str, Arc<dyn Component>); 6] = [
        ("appShell", Arc::new(AppShell::default())),
        ("table", Arc::new(TaskTable::default())),
        ("confirmDialog", Arc::new(ConfirmDialog)),
        ("articleEditor", Arc::new(ArticleEditor::default())),
        ("taskForm", Arc::new(TaskForm::default())),
        ("statusBadge", Arc::new(StatusBadge)),
    ];
    for (node_type, component) in components {
        registry.register(node_type, component, RegisterOptions::custom());
    }
}

/// Per-node state owned by a component, shared with its listeners
///
/// Only non-default values are stored: an entry that goes back to
/// `T::default()` is dropped. Keys are node ids and the registry never
/// learns when a node leaves the tree, so a non-default entry outlives its
/// node until that key renders again and resets it, or the component
/// removes it.
pub(crate) struct ComponentState<T> {
    inner: Arc<Mutex<HashMap<String, T>>>,
}

impl<T> Clone for ComponentState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ComponentState<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T: Clone + Default + PartialEq> ComponentState<T> {
    pub fn get(&self, key: &str) -> T {
        self.inner.lock().get(key).cloned().unwrap_or_default()
    }

    pub fn set(&self, key: &str, value: T) {
        let mut map = self.inner.lock();
        if value == T::default() {
            map.remove(key);
        } else {
            map.insert(key.to_string(), value);
        }
    }

    pub fn update<F: FnOnce(&mut T)>(&self, key: &str, f: F) {
        let mut map = self.inner.lock();
        let mut value = map.remove(key).unwrap_or_default();
        f(&mut value);
        if value != T::default() {
            map.insert(key.to_string(), value);
        }
    }

    pub fn remove(&self, key: &str) -> Option<T> {
        self.inner.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }
}

// ═══════════════════════════════════════════════════════════════
// statusBadge
// ═══════════════════════════════════════════════════════════════

/// Task status → label and tone
pub struct StatusBadge;

impl StatusBadge {
    pub fn describe(status: Option<&str>) -> (String, &'static str) {
        match status {
            Some("pending") => ("Pending".to_string(), "neutral"),
            Some("processing") => ("Processing".to_string(), "info"),
            Some("completed") => ("Completed".to_string(), "success"),
            Some("failed") => ("Failed".to_string(), "error"),
            Some(other) => (other.to_string(), "neutral"),
            None => ("Unknown".to_string(), "neutral"),
        }
    }
}

impl Component for StatusBadge {
    fn render(&self, ctx: &RenderContext<'_>) -> HostOutput {
        let status = ctx.node.str_prop("status");
        let (label, tone) = Self::describe(status);
        HostOutput::single(
            ctx.element(Primitive::Badge)
                .with_class(format!("q-tone-{} q-status-{}", tone, status.unwrap_or("unknown")))
                .with_attr("data-tone", tone)
                .with_attr("data-status", status.unwrap_or("unknown"))
                .with_text(label),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render;
    use crate::registry::{RegistrySource, PRIORITY_CUSTOM};
    use serde_json::json;

    #[test]
    fn test_registered_at_custom_tier() {
        let mut registry = ComponentRegistry::new();
        register_business_components(&mut registry);
        for node_type in BUSINESS_TYPES {
            let entry = registry.entry(node_type).unwrap();
            assert_eq!(entry.priority, PRIORITY_CUSTOM);
            assert_eq!(entry.source, RegistrySource::Custom);
        }
    }

    #[test]
    fn test_status_badge_tones() {
        let (out, _) = render(json!({"type": "statusBadge", "status": "completed"}));
        assert_eq!(out.elements()[0].attr("data-tone"), Some("success"));
        assert_eq!(out.text_content(), "Completed");

        let (out, _) = render(json!({"type": "statusBadge"}));
        assert_eq!(out.text_content(), "Unknown");
    }

    #[test]
    fn test_component_state_update_and_remove() {
        let state: ComponentState<u32> = ComponentState::default();
        let handle = state.clone();
        handle.update("a", |v| *v += 2);
        assert_eq!(state.get("a"), 2);
        assert_eq!(state.remove("a"), Some(2));
        assert_eq!(state.get("a"), 0);
    }

    #[test]
    fn test_component_state_drops_default_values() {
        let state: ComponentState<u32> = ComponentState::default();
        state.set("a", 3);
        state.update("b", |v| *v += 1);
        assert_eq!(state.len(), 2);

        state.set("a", 0);
        state.update("b", |v| *v -= 1);
        state.update("c", |_| {});
        assert_eq!(state.len(), 0);
    }
}
