//! Interactive primitives: button, input, textarea, select, checkbox, form
//!
//! Click and submit listeners pass the declared args through untouched.
//! Change listeners append the new value as the last argument.

use crate::host::{HostElement, HostEvent, HostOutput, Primitive};
use crate::render::RenderContext;

/// `variant`: primary (default), secondary, danger, ghost
pub(super) fn button(ctx: &RenderContext<'_>) -> HostOutput {
    let label = ctx.node.text_prop("text").unwrap_or_else(|| "Button".to_string());
    let variant = match ctx.node.str_prop("variant") {
        Some(v @ ("secondary" | "danger" | "ghost")) => v,
        _ => "primary",
    };
    let element = ctx
        .element(Primitive::Button)
        .with_class(format!("q-btn q-btn-{}", variant))
        .with_attr("type", "button")
        .with_text(label);

    if ctx.node.bool_prop("disabled").unwrap_or(false) {
        return HostOutput::single(element.with_attr("disabled", "disabled"));
    }
    HostOutput::single(ctx.bind(element, HostEvent::Click, "onClick"))
}

pub(super) fn input(ctx: &RenderContext<'_>) -> HostOutput {
    let input_type = match ctx.node.str_prop("inputType") {
        Some(t @ ("text" | "email" | "password" | "number" | "search" | "url")) => t,
        _ => "text",
    };
    let element = field(ctx, Primitive::Input).with_attr("type", input_type);
    HostOutput::single(ctx.bind(element, HostEvent::Change, "onChange"))
}

pub(super) fn textarea(ctx: &RenderContext<'_>) -> HostOutput {
    let rows = ctx.node.i64_prop("rows").filter(|r| *r > 0).unwrap_or(4);
    let element = field(ctx, Primitive::TextArea).with_attr("rows", rows.to_string());
    HostOutput::single(ctx.bind(element, HostEvent::Change, "onChange"))
}

/// Options are strings or `{value, label}` objects; unknown `value` selects nothing
pub(super) fn select(ctx: &RenderContext<'_>) -> HostOutput {
    let current = ctx.node.text_prop("value");
    let mut element = ctx.element(Primitive::Select);
    if let Some(name) = ctx.node.str_prop("name") {
        element = element.with_attr("name", name);
    }
    if let Some(label) = ctx.node.text_prop("label") {
        element = element.with_attr("aria-label", label);
    }

    for (value, label) in super::options(ctx.node.array_prop("options")) {
        let mut option = HostElement::text(Primitive::SelectOption, label).with_attr("value", value.as_str());
        if current.as_deref() == Some(value.as_str()) {
            option = option.with_attr("selected", "selected");
        }
        element = element.with_child(option);
    }
    HostOutput::single(ctx.bind(element, HostEvent::Change, "onChange"))
}

pub(super) fn checkbox(ctx: &RenderContext<'_>) -> HostOutput {
    let mut element = ctx.element(Primitive::Checkbox).with_attr("type", "checkbox");
    if let Some(name) = ctx.node.str_prop("name") {
        element = element.with_attr("name", name);
    }
    if let Some(label) = ctx.node.text_prop("label") {
        element = element.with_attr("aria-label", label);
    }
    if ctx.node.bool_prop("checked").unwrap_or(false) {
        element = element.with_attr("checked", "checked");
    }
    HostOutput::single(ctx.bind(element, HostEvent::Change, "onChange"))
}

/// Children plus a submit button when the form declares `onSubmit`
pub(super) fn form(ctx: &RenderContext<'_>) -> HostOutput {
    let mut element = ctx.element(Primitive::Form);
    if let Some(title) = ctx.node.text_prop("title") {
        element = element.with_text(title);
    }
    element = element.with_children(ctx.children());

    if let Some(action) = ctx.node.action("onSubmit") {
        let label = ctx
            .node
            .text_prop("submitText")
            .unwrap_or_else(|| "Submit".to_string());
        element = element
            .with_listener(ctx.listener(HostEvent::Submit, action.clone()))
            .with_child(
                HostElement::text(Primitive::Button, label)
                    .with_class("q-btn q-btn-primary")
                    .with_attr("type", "submit")
                    .with_listener(ctx.listener(HostEvent::Click, action)),
            );
    }
    HostOutput::single(element)
}

/// Shared shape of input and textarea
fn field(ctx: &RenderContext<'_>, primitive: Primitive) -> HostElement {
    let mut element = ctx.element(primitive);
    for key in ["name", "placeholder"] {
        if let Some(value) = ctx.node.text_prop(key) {
            element = element.with_attr(key, value);
        }
    }
    if let Some(label) = ctx.node.text_prop("label") {
        element = element.with_attr("aria-label", label);
    }
    if ctx.node.bool_prop("required").unwrap_or(false) {
        element = element.with_attr("required", "required");
    }
    element.with_text(ctx.node.text_prop("value").unwrap_or_default())
}
