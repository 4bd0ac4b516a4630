//! confirmDialog and articleEditor

use std::sync::Arc;

use serde_json::Value;

use super::ComponentState;
use crate::host::{HostElement, HostEvent, HostOutput, Listener, Primitive};
use crate::node::Action;
use crate::render::{Component, RenderContext};

// ═══════════════════════════════════════════════════════════════
// confirmDialog
// ═══════════════════════════════════════════════════════════════

/// Confirmation modal; closing it counts as cancel
pub struct ConfirmDialog;

impl Component for ConfirmDialog {
    fn render(&self, ctx: &RenderContext<'_>) -> HostOutput {
        if !ctx.node.bool_prop("open").unwrap_or(false) {
            return HostOutput::empty();
        }

        let title = ctx
            .node
            .text_prop("title")
            .unwrap_or_else(|| "Are you sure?".to_string());
        let cancel_text = ctx.node.text_prop("cancelText").unwrap_or_else(|| "Cancel".to_string());
        let confirm_text = ctx
            .node
            .text_prop("confirmText")
            .unwrap_or_else(|| "Confirm".to_string());

        let mut dialog = ctx
            .element(Primitive::Modal)
            .with_class("q-confirm")
            .with_attr("open", "open")
            .with_attr("role", "alertdialog")
            .with_text(title);
        dialog = ctx.bind(dialog, HostEvent::Close, "onCancel");

        if let Some(message) = ctx.node.text_prop("message") {
            dialog = dialog.with_child(HostElement::text(Primitive::Paragraph, message));
        }

        let cancel = ctx.bind(
            HostElement::text(Primitive::Button, cancel_text).with_class("q-btn q-btn-secondary"),
            HostEvent::Click,
            "onCancel",
        );
        let confirm = ctx.bind(
            HostElement::text(Primitive::Button, confirm_text).with_class("q-btn q-btn-danger"),
            HostEvent::Click,
            "onConfirm",
        );
        HostOutput::single(dialog.with_child(HostElement::new(Primitive::Row).with_child(cancel).with_child(confirm)))
    }
}

// ═══════════════════════════════════════════════════════════════
// articleEditor
// ═══════════════════════════════════════════════════════════════

/// Working copy of an article while the editor is open
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct EditorDraft {
    /// `content` the draft was started from
    seed: String,
    text: String,
}

/// Modal editor over a draft held in component state
///
/// Typing updates the draft without dispatching anything. `onSave` fires
/// with the current draft text appended; closing discards the draft.
#[derive(Default)]
pub struct ArticleEditor {
    drafts: ComponentState<EditorDraft>,
}

impl Component for ArticleEditor {
    fn render(&self, ctx: &RenderContext<'_>) -> HostOutput {
        let key = ctx.state_key();
        if !ctx.node.bool_prop("open").unwrap_or(false) {
            self.drafts.remove(&key);
            return HostOutput::empty();
        }

        let content = ctx.node.text_prop("content").unwrap_or_default();
        let draft = self.current_draft(&key, &content);
        let words = draft.text.split_whitespace().count();
        let title = ctx.node.text_prop("title").unwrap_or_else(|| "Edit article".to_string());

        let editor = {
            let drafts = self.drafts.clone();
            let key = key.clone();
            HostElement::text(Primitive::TextArea, draft.text.as_str())
                .with_attr("rows", "16")
                .with_attr("aria-label", "Article body")
                .with_listener(Listener::new(HostEvent::Change, move |payload| {
                    let Some(text) = payload.and_then(Value::as_str) else {
                        return;
                    };
                    drafts.update(&key, |d| d.text = text.to_string());
                }))
        };

        let mut dialog = ctx
            .element(Primitive::Modal)
            .with_class("q-editor")
            .with_attr("open", "open")
            .with_text(title)
            .with_child(editor)
            .with_child(crate::components::muted(format!("{} words", words)));

        let mut buttons = HostElement::new(Primitive::Row);
        if let Some(action) = ctx.node.action("onClose") {
            dialog = dialog.with_listener(self.closing(ctx, &key, HostEvent::Close, action.clone()));
            buttons = buttons.with_child(
                HostElement::text(Primitive::Button, "Close")
                    .with_class("q-btn q-btn-secondary")
                    .with_listener(self.closing(ctx, &key, HostEvent::Click, action)),
            );
        }
        if let Some(action) = ctx.node.action("onSave") {
            buttons = buttons.with_child(
                HostElement::text(Primitive::Button, "Save")
                    .with_class("q-btn q-btn-primary")
                    .with_listener(self.saving(ctx, &key, action)),
            );
        }
        HostOutput::single(dialog.with_child(buttons))
    }
}

impl ArticleEditor {
    /// Existing draft, or a fresh one when `content` changed underneath it
    fn current_draft(&self, key: &str, content: &str) -> EditorDraft {
        let mut current = EditorDraft::default();
        self.drafts.update(key, |draft| {
            if draft.seed != content {
                *draft = EditorDraft {
                    seed: content.to_string(),
                    text: content.to_string(),
                };
            }
            current = draft.clone();
        });
        current
    }

    /// Save reads the draft at click time, not at render time
    fn saving(&self, ctx: &RenderContext<'_>, key: &str, action: Action) -> Listener {
        let drafts = self.drafts.clone();
        let handler = Arc::clone(ctx.on_action);
        let key = key.to_string();
        let name = action.action.clone();
        let stop = action.stop_propagation;
        Listener::new(HostEvent::Click, move |_| {
            let text = drafts.get(&key).text;
            action.dispatch_with(handler.as_ref(), Value::String(text));
        })
        .describing(name)
        .stopping(stop)
    }

    fn closing(&self, ctx: &RenderContext<'_>, key: &str, event: HostEvent, action: Action) -> Listener {
        let drafts = self.drafts.clone();
        let handler = Arc::clone(ctx.on_action);
        let key = key.to_string();
        let name = action.action.clone();
        let stop = action.stop_propagation;
        Listener::new(event, move |_| {
            drafts.remove(&key);
            action.dispatch(handler.as_ref());
        })
        .describing(name)
        .stopping(stop)
    }
}

#[cfg(test)]
mod tests {
    use crate::components::test_support::render;
    use crate::host::{HostEvent, Primitive};
    use crate::node::{ActionLog, Node};
    use crate::registry::build_default_registry;
    use crate::render::Renderer;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_confirm_dialog_closed_renders_nothing() {
        let (out, _) = render(json!({"type": "confirmDialog", "message": "Delete?"}));
        assert!(out.is_empty());
    }

    #[test]
    fn test_confirm_dialog_actions() {
        let (out, log) = render(json!({
            "type": "confirmDialog", "open": true, "message": "Delete this task?",
            "onConfirm": {"action": "confirmDelete", "args": ["t1"]},
            "onCancel": {"action": "cancelDelete"}
        }));
        assert_eq!(out.elements()[0].text.as_deref(), Some("Are you sure?"));

        out.trigger(&out.path_of_text("Confirm").unwrap(), HostEvent::Click, None);
        out.trigger(&[0], HostEvent::Close, None);

        let entries = log.entries();
        assert_eq!(entries[0].action, "confirmDelete");
        assert_eq!(entries[0].args, vec![json!("t1")]);
        assert_eq!(entries[1].action, "cancelDelete");
    }

    #[test]
    fn test_editor_saves_current_draft() {
        let renderer = Renderer::new(Arc::new(build_default_registry()));
        let log = ActionLog::new();
        let node = Node::from_value(json!({
            "type": "articleEditor", "id": "editor", "open": true,
            "title": "Rust", "content": "first draft",
            "onSave": {"action": "saveArticle", "args": ["t1"]},
            "onClose": {"action": "closeEditor"}
        }))
        .unwrap();

        let out = renderer.render(&node, log.handler());
        assert!(out.text_content().contains("2 words"));
        let area = out.find_path(|e| e.primitive == Primitive::TextArea).unwrap();
        out.trigger(&area, HostEvent::Change, Some(json!("a much better draft")));
        assert!(log.is_empty());

        // Listeners from the stale render still see the new draft
        out.trigger(&out.path_of_text("Save").unwrap(), HostEvent::Click, None);
        let saved = log.last().unwrap();
        assert_eq!(saved.action, "saveArticle");
        assert_eq!(saved.args, vec![json!("t1"), json!("a much better draft")]);

        let out = renderer.render(&node, log.handler());
        assert!(out.text_content().contains("4 words"));
    }

    #[test]
    fn test_editor_close_discards_draft() {
        let renderer = Renderer::new(Arc::new(build_default_registry()));
        let log = ActionLog::new();
        let node = Node::from_value(json!({
            "type": "articleEditor", "id": "editor", "open": true, "content": "original",
            "onClose": {"action": "closeEditor"}
        }))
        .unwrap();

        let out = renderer.render(&node, log.handler());
        let area = out.find_path(|e| e.primitive == Primitive::TextArea).unwrap();
        out.trigger(&area, HostEvent::Change, Some(json!("edited")));
        out.trigger(&out.path_of_text("Close").unwrap(), HostEvent::Click, None);
        assert_eq!(log.last().unwrap().action, "closeEditor");

        let out = renderer.render(&node, log.handler());
        let area = out.find_path(|e| e.primitive == Primitive::TextArea).unwrap();
        assert_eq!(out.at(&area).unwrap().text.as_deref(), Some("original"));
    }
}
