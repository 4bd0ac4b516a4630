//! Layout primitives: container, stack, grid, card, divider

use serde_json::{json, Map, Value};

use crate::host::{HostElement, HostEvent, HostOutput, Primitive};
use crate::render::RenderContext;

/// Generic wrapper; `as` picks a landmark (`main`, `header`, `nav`, `aside`)
pub(super) fn container(ctx: &RenderContext<'_>) -> HostOutput {
    let primitive = match ctx.node.str_prop("as") {
        Some("main") => Primitive::Main,
        Some("header") => Primitive::Header,
        Some("nav") => Primitive::Nav,
        Some("aside") => Primitive::Aside,
        _ => Primitive::Block,
    };
    HostOutput::single(ctx.element(primitive).with_children(ctx.children()))
}

/// Vertical (default) or horizontal run of children
pub(super) fn stack(ctx: &RenderContext<'_>) -> HostOutput {
    let primitive = match ctx.node.str_prop("direction") {
        Some("horizontal") | Some("row") => Primitive::Row,
        _ => Primitive::Column,
    };
    let mut element = ctx.element(primitive);
    if let Some(gap) = ctx.node.f64_prop("gap").filter(|g| *g >= 0.0) {
        set_style(&mut element.style, "gap", json!(format!("{}px", gap)));
    }
    if let Some(align) = ctx.node.str_prop("align") {
        set_style(&mut element.style, "alignItems", json!(align));
    }
    HostOutput::single(element.with_children(ctx.children()))
}

pub(super) fn grid(ctx: &RenderContext<'_>) -> HostOutput {
    let columns = ctx
        .node
        .i64_prop("columns")
        .filter(|c| (1..=12).contains(c))
        .unwrap_or(2);
    let mut element = ctx
        .element(Primitive::Grid)
        .with_attr("data-columns", columns.to_string());
    set_style(
        &mut element.style,
        "gridTemplateColumns",
        json!(format!("repeat({}, 1fr)", columns)),
    );
    HostOutput::single(element.with_children(ctx.children()))
}

/// Titled panel with optional subtitle, footer node and click action
pub(super) fn card(ctx: &RenderContext<'_>) -> HostOutput {
    let mut element = ctx.element(Primitive::Card);
    if let Some(title) = ctx.node.text_prop("title") {
        element = element.with_text(title);
    }
    if let Some(subtitle) = ctx.node.text_prop("subtitle") {
        element = element.with_child(super::muted(subtitle));
    }
    element = element.with_children(ctx.children());

    let footer = ctx.render_field("footer");
    if !footer.is_empty() {
        element = element.with_child(
            HostElement::new(Primitive::Row)
                .with_class("q-card-footer")
                .with_children(footer),
        );
    }
    HostOutput::single(ctx.bind(element, HostEvent::Click, "onClick"))
}

pub(super) fn divider(ctx: &RenderContext<'_>) -> HostOutput {
    let element = ctx.element(Primitive::Divider);
    match ctx.node.text_prop("label") {
        Some(label) => HostOutput::single(element.with_attr("aria-label", label)),
        None => HostOutput::single(element),
    }
}

/// Derived style; an explicit `style` entry on the node wins
fn set_style(style: &mut Option<Map<String, Value>>, key: &str, value: Value) {
    style
        .get_or_insert_with(Map::new)
        .entry(key.to_string())
        .or_insert(value);
}
