//! taskForm - topic and keywords for a new article task

use std::sync::Arc;

use serde_json::Value;

use super::ComponentState;
use crate::host::{HostElement, HostEvent, HostOutput, Listener, Primitive};
use crate::node::{Action, SharedActionHandler};
use crate::render::{Component, RenderContext};

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TaskDraft {
    topic: String,
    keywords: String,
    error: Option<String>,
}

/// New-task form; field values stay in the component until submit
///
/// An empty topic shows an inline error instead of dispatching. A valid
/// submit dispatches `onSubmit` with `[topic, keywords]` appended and
/// clears the form.
#[derive(Default)]
pub struct TaskForm {
    drafts: ComponentState<TaskDraft>,
}

#[derive(Clone, Copy)]
enum Field {
    Topic,
    Keywords,
}

impl Component for TaskForm {
    fn render(&self, ctx: &RenderContext<'_>) -> HostOutput {
        let key = ctx.state_key();
        let draft = self.drafts.get(&key);
        let title = ctx.node.text_prop("title").unwrap_or_else(|| "New article".to_string());
        let submit_text = ctx
            .node
            .text_prop("submitText")
            .unwrap_or_else(|| "Generate".to_string());

        let mut form = ctx
            .element(Primitive::Form)
            .with_class("q-task-form")
            .with_text(title)
            .with_child(self.input(&key, Field::Topic, "Topic", &draft.topic))
            .with_child(self.input(&key, Field::Keywords, "Keywords", &draft.keywords));

        if let Some(error) = &draft.error {
            form = form.with_child(
                HostElement::new(Primitive::Alert)
                    .with_class("q-tone-error")
                    .with_attr("data-tone", "error")
                    .with_attr("role", "alert")
                    .with_child(HostElement::text(Primitive::Paragraph, error.as_str())),
            );
        }

        let mut button = HostElement::text(Primitive::Button, submit_text)
            .with_class("q-btn q-btn-primary")
            .with_attr("type", "submit");
        if let Some(action) = ctx.node.action("onSubmit") {
            form = form.with_listener(self.submitting(ctx.on_action, &key, HostEvent::Submit, action.clone()));
            button = button.with_listener(self.submitting(ctx.on_action, &key, HostEvent::Click, action));
        }
        HostOutput::single(form.with_child(button))
    }
}

impl TaskForm {
    fn input(&self, key: &str, field: Field, label: &str, value: &str) -> HostElement {
        let (name, placeholder) = match field {
            Field::Topic => ("topic", "What should the article cover?"),
            Field::Keywords => ("keywords", "Comma separated"),
        };
        let drafts = self.drafts.clone();
        let key = key.to_string();
        let mut input = HostElement::text(Primitive::Input, value)
            .with_attr("type", "text")
            .with_attr("name", name)
            .with_attr("aria-label", label)
            .with_attr("placeholder", placeholder);
        if matches!(field, Field::Topic) {
            input = input.with_attr("required", "required");
        }
        input.with_listener(Listener::new(HostEvent::Change, move |payload| {
            let Some(text) = payload.and_then(Value::as_str) else {
                return;
            };
            drafts.update(&key, |draft| match field {
                Field::Topic => {
                    draft.topic = text.to_string();
                    draft.error = None;
                }
                Field::Keywords => draft.keywords = text.to_string(),
            });
        }))
    }

    fn submitting(&self, handler: &SharedActionHandler, key: &str, event: HostEvent, action: Action) -> Listener {
        let drafts = self.drafts.clone();
        let handler = Arc::clone(handler);
        let key = key.to_string();
        let name = action.action.clone();
        let stop = action.stop_propagation;
        Listener::new(event, move |_| {
            let draft = drafts.get(&key);
            let topic = draft.topic.trim();
            if topic.is_empty() {
                tracing::debug!(form = %key, "task form submitted without a topic");
                drafts.update(&key, |d| d.error = Some("Topic is required".to_string()));
                return;
            }

            let mut args = action.args.clone();
            args.push(Value::String(topic.to_string()));
            args.push(Value::String(draft.keywords.trim().to_string()));
            drafts.remove(&key);
            handler.on_action(&action.action, &args);
        })
        .describing(name)
        .stopping(stop)
    }
}

#[cfg(test)]
mod tests {
    use crate::host::{HostEvent, HostOutput, Primitive};
    use crate::node::{ActionLog, Node};
    use crate::registry::build_default_registry;
    use crate::render::Renderer;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Renderer, Node, ActionLog) {
        let renderer = Renderer::new(Arc::new(build_default_registry()));
        let node = Node::from_value(json!({
            "type": "taskForm", "id": "new-task",
            "onSubmit": {"action": "createTask", "args": ["web"]}
        }))
        .unwrap();
        (renderer, node, ActionLog::new())
    }

    fn type_into(out: &HostOutput, name: &str, text: &str) {
        let path = out
            .find_path(|e| e.primitive == Primitive::Input && e.attr("name") == Some(name))
            .unwrap();
        out.trigger(&path, HostEvent::Change, Some(json!(text)));
    }

    #[test]
    fn test_empty_topic_shows_error_without_dispatch() {
        let (renderer, node, log) = setup();
        let out = renderer.render(&node, log.handler());
        out.trigger(&out.path_of_text("Generate").unwrap(), HostEvent::Click, None);
        assert!(log.is_empty());

        let out = renderer.render(&node, log.handler());
        assert!(out.text_content().contains("Topic is required"));
    }

    #[test]
    fn test_submit_appends_topic_and_keywords_then_resets() {
        let (renderer, node, log) = setup();
        let out = renderer.render(&node, log.handler());
        type_into(&out, "topic", "  Ownership in Rust ");
        type_into(&out, "keywords", "borrowing, lifetimes");
        assert!(log.is_empty());

        out.trigger(&[0], HostEvent::Submit, None);
        let entry = log.last().unwrap();
        assert_eq!(entry.action, "createTask");
        assert_eq!(
            entry.args,
            vec![json!("web"), json!("Ownership in Rust"), json!("borrowing, lifetimes")]
        );

        let out = renderer.render(&node, log.handler());
        let topic = out
            .find_path(|e| e.attr("name") == Some("topic"))
            .and_then(|p| out.at(&p).cloned())
            .unwrap();
        assert_eq!(topic.text.as_deref(), Some(""));
    }

    #[test]
    fn test_typing_clears_error() {
        let (renderer, node, log) = setup();
        let out = renderer.render(&node, log.handler());
        out.trigger(&[0], HostEvent::Submit, None);
        let out = renderer.render(&node, log.handler());
        type_into(&out, "topic", "Async");
        let out = renderer.render(&node, log.handler());
        assert!(!out.text_content().contains("Topic is required"));
    }
}
