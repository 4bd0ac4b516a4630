//! Node Tree Model
//!
//! A node is plain data: a `type` discriminator, a few passthrough
//! presentation hints, optional children and whatever type-specific fields
//! the producer put on it. The engine never interprets the type-specific
//! fields; components read them through the typed accessors below, which
//! treat malformed values as absent. The presentation hints and `children`
//! are read the same way: a wrong-typed hint is dropped, and a child entry
//! that is not a node becomes an [`INVALID_NODE_TYPE`] node for the fallback
//! to render.
//!
//! ```text
//! { "type": "card", "id": "c1", "title": "Drafts",
//!   "children": [ { "type": "button", "text": "New",
//!                   "onClick": { "action": "createTask" } } ] }
//! ```

mod action;
mod builder;

pub use action::{Action, ActionHandler, ActionLog, ActionRouter, DispatchedAction, SharedActionHandler};
pub use builder::NodeBuilder;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{QuillError, Result};

/// Type given to child entries that could not be decoded as nodes
pub const INVALID_NODE_TYPE: &str = "#invalid";

/// One piece of declarative UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    node_type: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_style", skip_serializing_if = "Option::is_none")]
    pub style: Option<Map<String, Value>>,

    #[serde(
        default,
        rename = "className",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_children", skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,

    /// Type-specific fields, kept verbatim (unknown fields included)
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

/// `children?: Node | Node[]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Children {
    Many(Vec<Node>),
    One(Box<Node>),
}

impl Children {
    pub fn as_slice(&self) -> &[Node] {
        match self {
            Children::Many(nodes) => nodes,
            Children::One(node) => std::slice::from_ref(node.as_ref()),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Renderer input: a single node or an ordered forest
#[derive(Debug, Clone, Copy)]
pub enum NodeInput<'a> {
    One(&'a Node),
    Many(&'a [Node]),
}

impl<'a> NodeInput<'a> {
    pub fn as_slice(&self) -> &'a [Node] {
        match *self {
            NodeInput::One(node) => std::slice::from_ref(node),
            NodeInput::Many(nodes) => nodes,
        }
    }
}

impl<'a> From<&'a Node> for NodeInput<'a> {
    fn from(node: &'a Node) -> Self {
        NodeInput::One(node)
    }
}

impl<'a> From<&'a [Node]> for NodeInput<'a> {
    fn from(nodes: &'a [Node]) -> Self {
        NodeInput::Many(nodes)
    }
}

impl<'a> From<&'a Vec<Node>> for NodeInput<'a> {
    fn from(nodes: &'a Vec<Node>) -> Self {
        NodeInput::Many(nodes.as_slice())
    }
}

impl<'a> From<&'a Children> for NodeInput<'a> {
    fn from(children: &'a Children) -> Self {
        NodeInput::Many(children.as_slice())
    }
}

impl Node {
    /// Create a bare node of the given type
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            id: None,
            style: None,
            class_name: None,
            children: None,
            props: Map::new(),
        }
    }

    /// Start a fluent builder
    pub fn builder(node_type: impl Into<String>) -> NodeBuilder {
        NodeBuilder::new(node_type)
    }

    /// The discriminator selecting catalog entry and component
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Parse a single node from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| QuillError::NodeParse {
            details: e.to_string(),
        })
    }

    /// Parse a single node from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| QuillError::NodeParse {
            details: e.to_string(),
        })
    }

    /// Parse a node from an already-decoded JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| QuillError::NodeParse {
            details: e.to_string(),
        })
    }

    /// Decode a child entry, substituting an [`INVALID_NODE_TYPE`] node on failure
    pub fn from_value_lenient(value: Value) -> Self {
        match serde_json::from_value::<Node>(value) {
            Ok(node) => node,
            Err(e) => {
                tracing::debug!(error = %e, "entry is not a node, substituting placeholder");
                Node::new(INVALID_NODE_TYPE)
            }
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Child nodes as a slice (empty when absent)
    pub fn child_nodes(&self) -> &[Node] {
        self.children.as_ref().map(Children::as_slice).unwrap_or(&[])
    }

    // ─────────────────────────────────────────────────────────────
    // Typed accessors
    // ─────────────────────────────────────────────────────────────

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key).filter(|v| !v.is_null())
    }

    pub fn str_prop(&self, key: &str) -> Option<&str> {
        self.prop(key).and_then(Value::as_str)
    }

    /// String field, or a number rendered as text
    pub fn text_prop(&self, key: &str) -> Option<String> {
        match self.prop(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn bool_prop(&self, key: &str) -> Option<bool> {
        self.prop(key).and_then(Value::as_bool)
    }

    pub fn f64_prop(&self, key: &str) -> Option<f64> {
        self.prop(key).and_then(Value::as_f64)
    }

    pub fn i64_prop(&self, key: &str) -> Option<i64> {
        self.prop(key).and_then(Value::as_i64)
    }

    pub fn array_prop(&self, key: &str) -> &[Value] {
        self.prop(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Interaction field holding an [`Action`]; malformed values read as absent
    pub fn action(&self, key: &str) -> Option<Action> {
        let value = self.prop(key)?;
        match serde_json::from_value::<Action>(value.clone()) {
            Ok(action) => Some(action),
            Err(e) => {
                tracing::debug!(node_type = %self.node_type, field = key, error = %e, "ignoring malformed action");
                None
            }
        }
    }

    /// Field holding a nested node (e.g. a modal footer)
    pub fn node_prop(&self, key: &str) -> Option<Node> {
        let value = self.prop(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    // ─────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────

    /// Depth-first walk; the visitor receives each node with its path
    /// (`""` for the root, `/children/0/children/2` below it)
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&str, &Node),
    {
        self.walk_at(String::new(), visit);
    }

    fn walk_at<F>(&self, path: String, visit: &mut F)
    where
        F: FnMut(&str, &Node),
    {
        visit(&path, self);
        for (i, child) in self.child_nodes().iter().enumerate() {
            child.walk_at(format!("{}/children/{}", path, i), visit);
        }
    }

    /// Total number of nodes in this subtree
    pub fn count_nodes(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }
}

/// Parse a file body holding either one node or an array of nodes
///
/// A lone root must be a node. Entries of a top-level array are decoded
/// one by one, like children.
pub fn parse_forest(content: &str) -> Result<Vec<Node>> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| QuillError::NodeParse {
        details: e.to_string(),
    })?;

    match value {
        Value::Array(items) => Ok(items.into_iter().map(Node::from_value_lenient).collect()),
        other => Ok(vec![Node::from_value(other)?]),
    }
}

// ─────────────────────────────────────────────────────────────
// Lenient field decoding
// ─────────────────────────────────────────────────────────────

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => {
            tracing::debug!(value = %other, "ignoring non-string presentation hint");
            None
        }
    })
}

fn lenient_style<'de, D>(deserializer: D) -> std::result::Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Some(map),
        Value::Null => None,
        other => {
            tracing::debug!(value = %other, "ignoring non-object style");
            None
        }
    })
}

fn lenient_children<'de, D>(deserializer: D) -> std::result::Result<Option<Children>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(Children::Many(
            items.into_iter().map(Node::from_value_lenient).collect(),
        )),
        value @ Value::Object(_) => Some(Children::One(Box::new(Node::from_value_lenient(value)))),
        Value::Null => None,
        other => {
            tracing::debug!(value = %other, "ignoring children that are neither a node nor a list");
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_node_with_children_list() {
        let node = Node::from_json(
            r#"{"type":"stack","id":"s","children":[{"type":"text","text":"a"},{"type":"text","text":"b"}]}"#,
        )
        .unwrap();

        assert_eq!(node.node_type(), "stack");
        assert_eq!(node.id.as_deref(), Some("s"));
        assert_eq!(node.child_nodes().len(), 2);
        assert_eq!(node.child_nodes()[1].str_prop("text"), Some("b"));
    }

    #[test]
    fn test_parse_node_with_single_child() {
        let node = Node::from_json(r#"{"type":"card","children":{"type":"text","text":"only"}}"#).unwrap();
        assert!(matches!(node.children, Some(Children::One(_))));
        assert_eq!(node.child_nodes().len(), 1);
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let node = Node::from_json(r#"{"type":"button","text":"Go","futureField":{"x":1}}"#).unwrap();
        assert_eq!(node.prop("futureField"), Some(&json!({"x": 1})));

        let back = node.to_value();
        assert_eq!(back["futureField"]["x"], 1);
        assert_eq!(back["type"], "button");
    }

    #[test]
    fn test_missing_type_is_a_parse_error() {
        let err = Node::from_json(r#"{"text":"no type"}"#).unwrap_err();
        assert_eq!(err.code(), "QUILL-001");
    }

    #[test]
    fn test_class_name_and_style_passthrough() {
        let node =
            Node::from_json(r#"{"type":"text","className":"lead","style":{"fontSize":"18px"}}"#).unwrap();
        assert_eq!(node.class_name.as_deref(), Some("lead"));
        assert_eq!(node.style.as_ref().unwrap()["fontSize"], "18px");
        assert!(node.props.is_empty());
    }

    #[test]
    fn test_action_accessor() {
        let node = Node::from_json(
            r#"{"type":"button","onClick":{"action":"foo","args":[1,2],"stopPropagation":true},"onHover":"nope"}"#,
        )
        .unwrap();

        let action = node.action("onClick").unwrap();
        assert_eq!(action.action, "foo");
        assert_eq!(action.args, vec![json!(1), json!(2)]);
        assert!(action.stop_propagation);

        assert!(node.action("onHover").is_none());
        assert!(node.action("onMissing").is_none());
    }

    #[test]
    fn test_text_prop_accepts_numbers() {
        let node = Node::from_json(r#"{"type":"stat","value":42}"#).unwrap();
        assert_eq!(node.text_prop("value"), Some("42".to_string()));
        assert_eq!(node.str_prop("value"), None);
    }

    #[test]
    fn test_walk_paths() {
        let node = Node::from_json(
            r#"{"type":"a","children":[{"type":"b"},{"type":"c","children":{"type":"d"}}]}"#,
        )
        .unwrap();

        let mut seen = Vec::new();
        node.walk(&mut |path, n| seen.push(format!("{}:{}", path, n.node_type())));

        assert_eq!(
            seen,
            vec![":a", "/children/0:b", "/children/1:c", "/children/1/children/0:d"]
        );
        assert_eq!(node.count_nodes(), 4);
    }

    #[test]
    fn test_wrong_typed_hints_read_as_absent() {
        let node = Node::from_json(
            r#"{"type":"text","id":7,"className":["a"],"style":"color:red","text":"kept"}"#,
        )
        .unwrap();
        assert!(node.id.is_none());
        assert!(node.class_name.is_none());
        assert!(node.style.is_none());
        assert_eq!(node.str_prop("text"), Some("kept"));
    }

    #[test]
    fn test_undecodable_children_become_invalid_nodes() {
        let node = Node::from_json(
            r#"{"type":"stack","children":[{"type":"text","text":"a"},{"text":"no type"},42]}"#,
        )
        .unwrap();
        let types: Vec<_> = node.child_nodes().iter().map(Node::node_type).collect();
        assert_eq!(types, vec!["text", INVALID_NODE_TYPE, INVALID_NODE_TYPE]);

        let odd = Node::from_json(r#"{"type":"card","children":"text"}"#).unwrap();
        assert!(odd.children.is_none());
    }

    #[test]
    fn test_parse_forest_single_and_many() {
        let one = parse_forest("type: text\ntext: hi\n").unwrap();
        assert_eq!(one.len(), 1);

        let many = parse_forest(r#"[{"type":"text"},{"type":"divider"}]"#).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].node_type(), "divider");
    }
}
