//! Data display primitives: table, list, stat, progress, empty

use serde_json::Value;

use crate::host::{HostElement, HostEvent, HostOutput, Primitive};
use crate::render::RenderContext;

/// One table column: the row field it reads and its header text
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Column {
    pub key: String,
    pub title: String,
}

/// Columns from `["topic", {"key": "status", "title": "Status"}]`
///
/// With no usable columns declared, the first row's fields are used.
pub(crate) fn parse_columns(declared: &[Value], rows: &[Value]) -> Vec<Column> {
    let columns: Vec<Column> = declared
        .iter()
        .filter_map(|c| match c {
            Value::String(key) => Some(Column {
                key: key.clone(),
                title: key.clone(),
            }),
            Value::Object(map) => {
                let key = map.get("key").and_then(Value::as_str)?.to_string();
                let title = map
                    .get("title")
                    .or_else(|| map.get("label"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| key.clone());
                Some(Column { key, title })
            }
            _ => None,
        })
        .collect();

    if !columns.is_empty() {
        return columns;
    }
    rows.first()
        .and_then(Value::as_object)
        .map(|row| {
            row.keys()
                .map(|k| Column {
                    key: k.clone(),
                    title: k.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Display text of `row[key]`; arrays join with commas, anything else is blank
pub(crate) fn cell_text(row: &Value, key: &str) -> String {
    match row.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(super::scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        Some(value) => super::scalar_text(value).unwrap_or_default(),
        None => String::new(),
    }
}

/// Row identity passed to row actions: `row.id`, else the row index
pub(crate) fn row_key(row: &Value, index: usize) -> Value {
    match row.get("id") {
        Some(id @ (Value::String(_) | Value::Number(_))) => id.clone(),
        _ => Value::from(index),
    }
}

pub(super) fn table(ctx: &RenderContext<'_>) -> HostOutput {
    let rows = ctx.node.array_prop("data");
    let columns = parse_columns(ctx.node.array_prop("columns"), rows);
    let row_action = ctx.node.action("onRowClick");

    let mut element = ctx.element(Primitive::Table).with_child(header_row(&columns));

    if rows.is_empty() {
        let empty = ctx
            .node
            .text_prop("emptyText")
            .unwrap_or_else(|| "No data".to_string());
        element = element.with_child(empty_row(empty, columns.len()));
        return HostOutput::single(element);
    }

    for (index, row) in rows.iter().enumerate() {
        let mut tr = HostElement::new(Primitive::TableRow).with_children(
            columns
                .iter()
                .map(|c| HostElement::text(Primitive::TableCell, cell_text(row, &c.key))),
        );
        if let Some(action) = &row_action {
            tr = tr.with_listener(ctx.listener_with(HostEvent::Click, action.clone(), vec![row_key(row, index)]));
        }
        element = element.with_child(tr);
    }
    HostOutput::single(element)
}

pub(crate) fn header_row(columns: &[Column]) -> HostElement {
    HostElement::new(Primitive::TableRow).with_children(
        columns
            .iter()
            .map(|c| HostElement::text(Primitive::TableHeader, c.title.as_str())),
    )
}

pub(crate) fn empty_row(text: String, span: usize) -> HostElement {
    HostElement::new(Primitive::TableRow).with_child(
        HostElement::text(Primitive::TableCell, text)
            .with_class("q-muted")
            .with_attr("colspan", span.max(1).to_string()),
    )
}

/// `items` as plain entries, followed by `children` each in its own item
pub(super) fn list(ctx: &RenderContext<'_>) -> HostOutput {
    let mut element = ctx.element(Primitive::List);
    if ctx.node.bool_prop("ordered").unwrap_or(false) {
        element = element.with_attr("data-ordered", "true");
    }

    for item in ctx.node.array_prop("items") {
        if let Some(text) = super::scalar_text(item) {
            element = element.with_child(HostElement::text(Primitive::ListItem, text));
        }
    }
    for child in ctx.children() {
        element = element.with_child(HostElement::new(Primitive::ListItem).with_child(child));
    }
    HostOutput::single(element)
}

/// Metric tile: label, value and an optional signed delta
pub(super) fn stat(ctx: &RenderContext<'_>) -> HostOutput {
    let label = ctx.node.text_prop("label").unwrap_or_default();
    let value = ctx.node.text_prop("value").unwrap_or_else(|| "—".to_string());

    let mut element = ctx
        .element(Primitive::Block)
        .with_class("q-stat")
        .with_child(HostElement::text(Primitive::Label, label))
        .with_child(HostElement::text(Primitive::Strong, value));

    if let Some(delta) = ctx.node.f64_prop("delta") {
        let tone = if delta >= 0.0 { "success" } else { "error" };
        element = element.with_child(
            HostElement::text(Primitive::Badge, format!("{:+}", delta))
                .with_class(format!("q-tone-{}", tone))
                .with_attr("data-tone", tone),
        );
    }
    HostOutput::single(element)
}

/// `value` clamped to `[0, max]`; `max` defaults to 100
pub(super) fn progress(ctx: &RenderContext<'_>) -> HostOutput {
    let max = ctx.node.f64_prop("max").filter(|m| *m > 0.0).unwrap_or(100.0);
    let value = ctx.node.f64_prop("value").unwrap_or(0.0).clamp(0.0, max);

    let mut element = ctx
        .element(Primitive::Progress)
        .with_attr("value", value.to_string())
        .with_attr("max", max.to_string());
    if let Some(label) = ctx.node.text_prop("label") {
        element = element.with_attr("aria-label", label);
    }
    HostOutput::single(element)
}

/// Empty state with an optional call to action
pub(super) fn empty(ctx: &RenderContext<'_>) -> HostOutput {
    let text = ctx
        .node
        .text_prop("text")
        .unwrap_or_else(|| "Nothing here yet".to_string());
    let mut element = ctx
        .element(Primitive::Block)
        .with_class("q-empty")
        .with_child(super::muted(text));

    if let Some(action) = ctx.node.action("action") {
        let label = ctx
            .node
            .text_prop("actionText")
            .unwrap_or_else(|| action.action.clone());
        element = element.with_child(
            HostElement::text(Primitive::Button, label)
                .with_class("q-btn q-btn-primary")
                .with_listener(ctx.listener(HostEvent::Click, action)),
        );
    }
    HostOutput::single(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render;
    use serde_json::json;

    #[test]
    fn test_columns_from_first_row_when_undeclared() {
        let rows = vec![json!({"id": 1, "topic": "Rust"})];
        let columns = parse_columns(&[], &rows);
        assert_eq!(columns.iter().map(|c| c.key.as_str()).collect::<Vec<_>>(), vec!["id", "topic"]);
    }

    #[test]
    fn test_cell_text_shapes() {
        let row = json!({"tags": ["a", "b", {"x": 1}], "n": 3, "obj": {"k": 1}});
        assert_eq!(cell_text(&row, "tags"), "a, b");
        assert_eq!(cell_text(&row, "n"), "3");
        assert_eq!(cell_text(&row, "obj"), "");
        assert_eq!(cell_text(&row, "missing"), "");
    }

    #[test]
    fn test_generic_table_rows_and_row_click() {
        let registry = {
            let mut r = crate::registry::ComponentRegistry::new();
            crate::components::register_standard_components(&mut r);
            std::sync::Arc::new(r)
        };
        let log = crate::node::ActionLog::new();
        let node = crate::node::Node::from_value(json!({
            "type": "table",
            "columns": [{"key": "topic", "title": "Topic"}],
            "data": [{"id": "t1", "topic": "Rust"}, {"topic": "Go"}],
            "onRowClick": {"action": "open"}
        }))
        .unwrap();
        let out = crate::render::Renderer::new(registry).render(&node, log.handler());

        let table = &out.elements()[0];
        assert_eq!(table.children.len(), 3);
        out.trigger(&[0, 1], HostEvent::Click, None);
        out.trigger(&[0, 2], HostEvent::Click, None);
        let args: Vec<_> = log.entries().into_iter().map(|e| e.args).collect();
        assert_eq!(args, vec![vec![json!("t1")], vec![json!(1)]]);
    }

    #[test]
    fn test_progress_clamps() {
        let (out, _) = render(json!({"type": "progress", "value": 150, "max": 100}));
        assert_eq!(out.elements()[0].attr("value"), Some("100"));
    }

    #[test]
    fn test_empty_with_action() {
        let (out, log) = render(json!({
            "type": "empty", "text": "No tasks", "actionText": "New task",
            "action": {"action": "navigate", "args": ["create"]}
        }));
        let path = out.path_of_text("New task").unwrap();
        out.trigger(&path, HostEvent::Click, None);
        assert_eq!(log.last().unwrap().args, vec![json!("create")]);
    }

    #[test]
    fn test_list_items_and_children() {
        let (out, _) = render(json!({
            "type": "list", "items": ["a", 2, null],
            "children": [{"type": "badge", "text": "c"}]
        }));
        assert_eq!(out.elements()[0].children.len(), 3);
        assert_eq!(out.text_content(), "a 2 c");
    }
}
