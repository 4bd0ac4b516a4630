//! Renderer behavior through the public API

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quill::registry::build_default_registry;
use quill::node::INVALID_NODE_TYPE;
use quill::{render, ActionLog, HostEvent, HostOutput, Node, Primitive, Renderer};
use serde_json::json;

fn renderer() -> Renderer {
    Renderer::new(Arc::new(build_default_registry()))
}

fn node(value: serde_json::Value) -> Node {
    Node::from_value(value).unwrap()
}

#[test]
fn test_list_renders_in_order() {
    let nodes = vec![
        node(json!({"type": "text", "text": "first"})),
        node(json!({"type": "text", "text": "second"})),
        node(json!({"type": "text", "text": "third"})),
    ];

    let out = renderer().render(&nodes, ActionLog::new().handler());
    let texts: Vec<_> = out.elements().iter().map(|e| e.text_content()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn test_list_output_is_concatenation_of_single_outputs() {
    let x = node(json!({"type": "button", "text": "Go", "onClick": {"action": "go", "args": [1]}}));
    let y = node(json!({"type": "card", "title": "Drafts", "children": [{"type": "text", "text": "none"}]}));
    let renderer = renderer();
    let log = ActionLog::new();

    let together = renderer.render(&vec![x.clone(), y.clone()], log.handler());
    let apart = HostOutput::concat([renderer.render(&x, log.handler()), renderer.render(&y, log.handler())]);
    assert_eq!(together, apart);
}

#[test]
fn test_malformed_hints_and_children_do_not_abort_the_tree() {
    let nodes = quill::parse_forest(
        r#"[
            {"type": "text", "text": "ok"},
            {"type": "card", "children": [{"type": "text", "style": "color:red", "text": "styled"}]},
            {"type": "text", "id": 7, "text": "numbered"},
            {"type": "stack", "children": [{"text": "no type"}, {"type": "text", "text": "after"}]}
        ]"#,
    )
    .unwrap();

    let out = renderer().render(&nodes, ActionLog::new().handler());
    assert_eq!(out.len(), 4);
    let text = out.text_content();
    for expected in ["ok", "styled", "numbered", "after"] {
        assert!(text.contains(expected), "missing {:?} in {:?}", expected, text);
    }

    let stack = &out.elements()[3];
    assert_eq!(stack.children[0].primitive, Primitive::Placeholder);
    assert_eq!(stack.children[0].attr("data-node-type"), Some(INVALID_NODE_TYPE));
}

#[test]
fn test_unknown_sibling_does_not_disturb_neighbours() {
    let nodes = vec![
        node(json!({"type": "text", "text": "before"})),
        node(json!({"type": "sparkline", "points": [1, 2, 3]})),
        node(json!({"type": "button", "text": "after"})),
    ];

    let out = renderer().render(&nodes, ActionLog::new().handler());
    assert_eq!(out.len(), 3);
    assert_eq!(out.elements()[0].text_content(), "before");
    assert_eq!(out.elements()[1].primitive, Primitive::Placeholder);
    assert_eq!(out.elements()[1].attr("data-node-type"), Some("sparkline"));
    assert_eq!(out.elements()[2].primitive, Primitive::Button);
}

#[test]
fn test_cleared_fallback_drops_only_unknown_nodes() {
    let mut registry = build_default_registry();
    registry.clear_fallback();
    let renderer = Renderer::new(Arc::new(registry));

    let nodes = vec![node(json!({"type": "text", "text": "kept"})), Node::new("sparkline")];
    let out = renderer.render(&nodes, ActionLog::new().handler());
    assert_eq!(out.len(), 1);
    assert_eq!(out.text_content(), "kept");
}

#[test]
fn test_nested_children_render_through_registry() {
    let tree = node(json!({
        "type": "card",
        "title": "Queue",
        "children": [
            {"type": "stack", "children": [
                {"type": "text", "text": "one"},
                {"type": "text", "text": "two"}
            ]}
        ]
    }));

    let out = renderer().render(&tree, ActionLog::new().handler());
    assert_eq!(out.len(), 1);
    let card = &out.elements()[0];
    assert_eq!(card.primitive, Primitive::Card);
    assert_eq!(card.children.len(), 1);
    assert_eq!(card.children[0].children.len(), 2);
    assert_eq!(out.text_content(), "Queue one two");
}

#[test]
fn test_stop_propagation_keeps_row_action_from_reaching_card() {
    let tree = node(json!({
        "type": "card",
        "title": "task-1",
        "onClick": {"action": "openTask", "args": ["task-1"]},
        "children": [
            {"type": "button", "text": "Delete", "onClick": {"action": "requestDelete", "args": ["task-1"], "stopPropagation": true}},
            {"type": "button", "text": "Peek", "onClick": {"action": "peek"}}
        ]
    }));
    let log = ActionLog::new();
    let out = renderer().render(&tree, log.handler());

    let delete = out.path_of_text("Delete").unwrap();
    let outcome = out.trigger(&delete, HostEvent::Click, None);
    assert!(outcome.stopped);
    assert_eq!(outcome.fired, 1);

    let peek = out.path_of_text("Peek").unwrap();
    let outcome = out.trigger(&peek, HostEvent::Click, None);
    assert!(!outcome.stopped);
    assert_eq!(outcome.fired, 2);

    let names: Vec<_> = log.entries().into_iter().map(|e| e.action).collect();
    assert_eq!(names, vec!["requestDelete", "peek", "openTask"]);
}

#[test]
fn test_args_pass_through_verbatim() {
    let tree = node(json!({
        "type": "button",
        "text": "Go",
        "onClick": {"action": "navigate", "args": ["archive", {"page": 2}, null, 3.5]}
    }));
    let log = ActionLog::new();
    let out = renderer().render(&tree, log.handler());
    out.trigger(&[0], HostEvent::Click, Some(json!("ignored")));

    let entry = log.last().unwrap();
    assert_eq!(entry.action, "navigate");
    assert_eq!(entry.args, vec![json!("archive"), json!({"page": 2}), json!(null), json!(3.5)]);
}

#[test]
fn test_rendering_dispatches_nothing() {
    let tree = node(json!({
        "type": "stack",
        "children": [
            {"type": "button", "text": "A", "onClick": {"action": "a"}},
            {"type": "input", "name": "topic", "onChange": {"action": "b"}}
        ]
    }));
    let log = ActionLog::new();
    renderer().render(&tree, log.handler());
    assert!(log.is_empty());
}

#[test]
fn test_module_level_render_uses_default_registry() {
    let out = render(&node(json!({"type": "statusBadge", "status": "completed"})), ActionLog::new().handler());
    assert_eq!(out.len(), 1);
    assert_eq!(out.text_content(), "Completed");
}

#[test]
fn test_yaml_forest_renders() {
    let nodes = quill::parse_forest("- type: heading\n  text: Drafts\n  level: 2\n- type: divider\n").unwrap();
    let out = renderer().render(&nodes, ActionLog::new().handler());
    assert_eq!(out.elements()[0].primitive, Primitive::Heading(2));
    assert_eq!(out.elements()[1].primitive, Primitive::Divider);
}
