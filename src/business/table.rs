//! Task table - replaces the generic `table` with row actions and paging

use serde_json::Value;

use super::ComponentState;
use crate::components::{cell_text, empty_row, header_row, parse_columns, row_key, Column};
use crate::host::{HostElement, HostEvent, HostOutput, Listener, Primitive};
use crate::node::Node;
use crate::render::{Component, RenderContext};

const DEFAULT_PAGE_SIZE: usize = 10;

/// Row action fields, in button order
const ROW_ACTIONS: [(&str, &str); 3] = [("onView", "View"), ("onClone", "Clone"), ("onDelete", "Delete")];

/// Paginated table; the page cursor is kept per table id
#[derive(Default)]
pub struct TaskTable {
    pages: ComponentState<usize>,
}

impl Component for TaskTable {
    fn render(&self, ctx: &RenderContext<'_>) -> HostOutput {
        let rows = ctx.node.array_prop("data");
        let columns = parse_columns(ctx.node.array_prop("columns"), rows);
        let page_size = ctx
            .node
            .i64_prop("pageSize")
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let key = ctx.state_key();
        let page_count = rows.len().div_ceil(page_size).max(1);
        // Data may have shrunk since the cursor last moved
        let stored = self.pages.get(&key);
        let page = stored.min(page_count - 1);
        if page != stored {
            self.pages.set(&key, page);
        }

        let actions: Vec<_> = ROW_ACTIONS
            .iter()
            .filter_map(|(field, label)| ctx.node.action(field).map(|a| (*field, *label, a)))
            .collect();

        let mut header = header_row(&columns);
        if !actions.is_empty() {
            header = header.with_child(HostElement::text(Primitive::TableHeader, "Actions"));
        }
        let mut table = HostElement::new(Primitive::Table).with_child(header);

        if rows.is_empty() {
            let text = ctx
                .node
                .text_prop("emptyText")
                .unwrap_or_else(|| "No tasks yet".to_string());
            table = table.with_child(empty_row(text, columns.len() + usize::from(!actions.is_empty())));
        }

        let row_click = ctx.node.action("onRowClick");
        let start = page * page_size;
        for (index, row) in rows.iter().enumerate().skip(start).take(page_size) {
            let id = row_key(row, index);
            let mut tr = HostElement::new(Primitive::TableRow).with_children(columns.iter().map(|c| self.cell(ctx, row, c)));

            if !actions.is_empty() {
                let mut cell = HostElement::new(Primitive::TableCell).with_class("q-row-actions");
                for (field, label, action) in &actions {
                    let variant = if *field == "onDelete" { "danger" } else { "ghost" };
                    cell = cell.with_child(
                        HostElement::text(Primitive::Button, *label)
                            .with_class(format!("q-btn q-btn-{}", variant))
                            .with_attr("data-row", id_text(&id))
                            .with_listener(ctx.listener_with(HostEvent::Click, action.clone(), vec![id.clone()])),
                    );
                }
                tr = tr.with_child(cell);
            }
            if let Some(action) = &row_click {
                tr = tr.with_listener(ctx.listener_with(HostEvent::Click, action.clone(), vec![id.clone()]));
            }
            table = table.with_child(tr);
        }

        let mut wrapper = ctx
            .element(Primitive::Block)
            .with_class("q-task-table")
            .with_child(table);
        if page_count > 1 {
            wrapper = wrapper.with_child(self.pager(&key, page, page_count));
        }
        HostOutput::single(wrapper)
    }
}

impl TaskTable {
    /// `status` columns render through `statusBadge`, everything else as text
    fn cell(&self, ctx: &RenderContext<'_>, row: &Value, column: &Column) -> HostElement {
        if column.key == "status" {
            let badge = Node::builder("statusBadge")
                .prop_opt("status", row.get("status").and_then(Value::as_str))
                .build();
            return HostElement::new(Primitive::TableCell).with_children(ctx.render_children(&badge));
        }
        HostElement::text(Primitive::TableCell, cell_text(row, &column.key))
    }

    fn pager(&self, key: &str, page: usize, page_count: usize) -> HostElement {
        let step = |delta: isize, label: &str, enabled: bool| {
            let button = HostElement::text(Primitive::Button, label).with_class("q-btn q-btn-ghost");
            if !enabled {
                return button.with_attr("disabled", "disabled");
            }
            let state = self.pages.clone();
            let key = key.to_string();
            let target = page.saturating_add_signed(delta).min(page_count - 1);
            button.with_listener(Listener::new(HostEvent::Click, move |_| state.set(&key, target)))
        };

        HostElement::new(Primitive::Row)
            .with_class("q-pager")
            .with_child(step(-1, "‹ Prev", page > 0))
            .with_child(HostElement::text(
                Primitive::Text,
                format!("Page {} of {}", page + 1, page_count),
            ))
            .with_child(step(1, "Next ›", page + 1 < page_count))
    }
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
