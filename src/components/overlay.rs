//! Navigation and overlay primitives: tabs, alert, modal

use serde_json::Value;

use crate::host::{HostElement, HostEvent, HostOutput, Primitive};
use crate::render::RenderContext;

/// Tab strip plus the panel holding `children`
///
/// Selecting a tab dispatches `onChange` with the tab key appended.
pub(super) fn tabs(ctx: &RenderContext<'_>) -> HostOutput {
    let items = super::options(ctx.node.array_prop("items"));
    let active = ctx
        .node
        .text_prop("active")
        .or_else(|| items.first().map(|(key, _)| key.clone()));
    let on_change = ctx.node.action("onChange");

    let mut strip = HostElement::new(Primitive::Nav).with_class("q-tabs");
    for (key, label) in &items {
        let selected = active.as_deref() == Some(key.as_str());
        let mut tab = HostElement::text(Primitive::Button, label.as_str())
            .with_class(if selected { "q-tab q-tab-active" } else { "q-tab" })
            .with_attr("role", "tab")
            .with_attr("aria-selected", selected.to_string())
            .with_attr("data-key", key.as_str());
        if let Some(action) = &on_change {
            tab = tab.with_listener(ctx.listener_with(
                HostEvent::Click,
                action.clone(),
                vec![Value::String(key.clone())],
            ));
        }
        strip = strip.with_child(tab);
    }

    let panel = HostElement::new(Primitive::Block)
        .with_class("q-tab-panel")
        .with_children(ctx.children());

    HostOutput::single(ctx.element(Primitive::Block).with_child(strip).with_child(panel))
}

/// Toned banner; dismissible when `onClose` is set
pub(super) fn alert(ctx: &RenderContext<'_>) -> HostOutput {
    let tone = super::tone(ctx.node.str_prop("tone"));
    let mut element = ctx
        .element(Primitive::Alert)
        .with_class(format!("q-tone-{}", tone))
        .with_attr("data-tone", tone)
        .with_attr("role", "alert");

    if let Some(title) = ctx.node.text_prop("title") {
        element = element.with_text(title);
    }
    if let Some(text) = ctx.node.text_prop("text") {
        element = element.with_child(HostElement::text(Primitive::Paragraph, text));
    }
    element = element.with_children(ctx.children());

    if let Some(action) = ctx.node.action("onClose") {
        element = element.with_child(
            HostElement::text(Primitive::Button, "Dismiss")
                .with_class("q-btn q-btn-ghost")
                .with_listener(ctx.listener(HostEvent::Click, action)),
        );
    }
    HostOutput::single(element)
}

/// Dialog; renders nothing when `open` is false
pub(super) fn modal(ctx: &RenderContext<'_>) -> HostOutput {
    if !ctx.node.bool_prop("open").unwrap_or(true) {
        return HostOutput::empty();
    }

    let mut element = ctx.element(Primitive::Modal).with_attr("open", "open");
    if let Some(title) = ctx.node.text_prop("title") {
        element = element.with_text(title);
    }
    element = element.with_children(ctx.children());

    let mut footer = HostElement::new(Primitive::Row)
        .with_class("q-modal-footer")
        .with_children(ctx.render_field("footer"));

    if let Some(action) = ctx.node.action("onClose") {
        element = element.with_listener(ctx.listener(HostEvent::Close, action.clone()));
        footer = footer.with_child(
            HostElement::text(Primitive::Button, "Close")
                .with_class("q-btn q-btn-secondary")
                .with_listener(ctx.listener(HostEvent::Click, action)),
        );
    }
    if !footer.children.is_empty() {
        element = element.with_child(footer);
    }
    HostOutput::single(element)
}
