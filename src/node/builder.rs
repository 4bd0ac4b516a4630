//! Fluent construction of node trees from Rust code

use serde_json::{Map, Value};

use super::{Action, Children, Node};

/// Fluent builder for [`Node`]
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    node: Node,
    children: Vec<Node>,
}

impl NodeBuilder {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node: Node::new(node_type),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.node.id = Some(id.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.node.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.node
            .style
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set a type-specific field
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.node.props.insert(key.into(), value.into());
        self
    }

    /// Set a field only when a value is present
    pub fn prop_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.prop(key, v),
            None => self,
        }
    }

    /// Attach an interaction field (`onClick`, `onChange`, ...)
    pub fn on(self, field: impl Into<String>, action: Action) -> Self {
        let value = action.to_value();
        self.prop(field, value)
    }

    /// Embed a nested node in a field (e.g. a modal footer)
    pub fn node_prop(self, key: impl Into<String>, node: Node) -> Self {
        let value = node.to_value();
        self.prop(key, value)
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I: IntoIterator<Item = Node>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    pub fn build(mut self) -> Node {
        if !self.children.is_empty() {
            self.node.children = Some(Children::Many(self.children));
        }
        self.node
    }
}
