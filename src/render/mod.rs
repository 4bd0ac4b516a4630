//! Renderer - recursive, fallback-safe tree walk
//!
//! Given a node or a list of nodes and a single action handler, the
//! renderer resolves each node's component through the registry and lets
//! it produce host output. Components receive a [`RenderContext`] whose
//! `render_children` is the same entry point, so containers recurse
//! without knowing about the registry.
//!
//! ```text
//! render([a, b], on_action)
//!   ├─ resolve(a.type) ── Registered │ Fallback │ Unresolved (warn, nothing)
//!   │     └─ component.render(ctx{node: a, on_action, renderer, depth})
//!   │           └─ ctx.children() ── render(a.children) ...
//!   └─ resolve(b.type) ...
//! output = render(a) ++ render(b)
//! ```
//!
//! A node never affects its siblings: each one resolves on its own and an
//! unknown type degrades to a placeholder (or to nothing).

mod fallback;

pub use fallback::PlaceholderComponent;

use std::sync::Arc;

use serde_json::Value;

use crate::host::{HostElement, HostEvent, HostOutput, Listener, Primitive};
use crate::node::{Action, Node, NodeInput, SharedActionHandler};
use crate::registry::{default_registry, ComponentRegistry, Resolution};

/// Renders one node into host output
pub trait Component: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> HostOutput;
}

impl<F> Component for F
where
    F: Fn(&RenderContext<'_>) -> HostOutput + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> HostOutput {
        self(ctx)
    }
}

/// Bounds on a single render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLimits {
    /// Nodes nested deeper than this render as a placeholder
    pub max_depth: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Everything a component sees while rendering one node
pub struct RenderContext<'a> {
    pub node: &'a Node,
    pub on_action: &'a SharedActionHandler,
    pub renderer: &'a Renderer,
    pub depth: usize,
}

impl<'a> RenderContext<'a> {
    /// Render any node or node list one level below this node
    pub fn render_children<'n>(&self, input: impl Into<NodeInput<'n>>) -> HostOutput {
        self.renderer.render_at(input.into(), self.on_action, self.depth + 1)
    }

    /// Render this node's own `children` field
    pub fn children(&self) -> HostOutput {
        self.render_children(self.node.child_nodes())
    }

    /// Render a node embedded in a field (e.g. a modal footer)
    pub fn render_field(&self, field: &str) -> HostOutput {
        match self.node.node_prop(field) {
            Some(node) => self.render_children(&node),
            None => HostOutput::empty(),
        }
    }

    /// Host element of `primitive` carrying this node's id, class and style
    pub fn element(&self, primitive: Primitive) -> HostElement {
        let mut element = HostElement::new(primitive).with_id_opt(self.node.id.as_deref());
        if let Some(class) = &self.node.class_name {
            element = element.with_class(class);
        }
        element.style = self.node.style.clone();
        element
    }

    /// Listener that dispatches `action` through the pass's handler
    ///
    /// Change events append the interaction value to the declared args;
    /// every other event passes the args through verbatim.
    pub fn listener(&self, event: HostEvent, action: Action) -> Listener {
        let handler = Arc::clone(self.on_action);
        let name = action.action.clone();
        let stop = action.stop_propagation;
        Listener::new(event, move |payload: Option<&Value>| match (event, payload) {
            (HostEvent::Change, Some(value)) => action.dispatch_with(handler.as_ref(), value.clone()),
            _ => action.dispatch(handler.as_ref()),
        })
        .describing(name)
        .stopping(stop)
    }

    /// Listener that appends fixed trailing values (row ids, draft text)
    pub fn listener_with(&self, event: HostEvent, mut action: Action, extra: Vec<Value>) -> Listener {
        action.args.extend(extra);
        self.listener(event, action)
    }

    /// Attach a listener for the action in `field`, if the node declares one
    pub fn bind(&self, element: HostElement, event: HostEvent, field: &str) -> HostElement {
        match self.node.action(field) {
            Some(action) => element.with_listener(self.listener(event, action)),
            None => element,
        }
    }

    /// Dispatch the action in `field` right now (no-op when absent)
    pub fn dispatch_field(&self, field: &str, extra: Vec<Value>) {
        if let Some(action) = self.node.action(field) {
            let mut args = action.args;
            args.extend(extra);
            self.on_action.on_action(&action.action, &args);
        }
    }

    /// Key for component-internal state: the node id, else its type
    pub fn state_key(&self) -> String {
        self.node
            .id
            .clone()
            .unwrap_or_else(|| self.node.node_type().to_string())
    }
}

/// Registry-driven tree walker
#[derive(Debug, Clone)]
pub struct Renderer {
    registry: Arc<ComponentRegistry>,
    limits: RenderLimits,
}

impl Renderer {
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self {
            registry,
            limits: RenderLimits::default(),
        }
    }

    /// Renderer over a snapshot of the process-wide default registry
    pub fn with_default() -> Self {
        Self::new(default_registry())
    }

    pub fn with_limits(mut self, limits: RenderLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    pub fn limits(&self) -> RenderLimits {
        self.limits
    }

    /// Render a node or a list of nodes
    ///
    /// Lists render element by element and concatenate in order.
    pub fn render<'n>(&self, input: impl Into<NodeInput<'n>>, on_action: SharedActionHandler) -> HostOutput {
        self.render_at(input.into(), &on_action, 0)
    }

    pub(crate) fn render_at(&self, input: NodeInput<'_>, on_action: &SharedActionHandler, depth: usize) -> HostOutput {
        let mut output = HostOutput::empty();
        for node in input.as_slice() {
            output.extend(self.render_node(node, on_action, depth));
        }
        output
    }

    fn render_node(&self, node: &Node, on_action: &SharedActionHandler, depth: usize) -> HostOutput {
        if depth > self.limits.max_depth {
            tracing::warn!(
                node_type = node.node_type(),
                depth,
                max_depth = self.limits.max_depth,
                "node nested too deep, rendering placeholder"
            );
            return HostOutput::single(
                HostElement::text(
                    Primitive::Placeholder,
                    format!("'{}' nested deeper than {}", node.node_type(), self.limits.max_depth),
                )
                .with_attr("data-node-type", node.node_type()),
            );
        }

        let component = match self.registry.resolve(node.node_type()) {
            Resolution::Registered(component) => component,
            Resolution::Fallback(component) => {
                tracing::debug!(node_type = node.node_type(), "unknown node type, using fallback");
                component
            }
            Resolution::Unresolved => {
                tracing::warn!(node_type = node.node_type(), "unknown node type and no fallback, skipping");
                return HostOutput::empty();
            }
        };

        let ctx = RenderContext {
            node,
            on_action,
            renderer: self,
            depth,
        };
        component.render(&ctx)
    }
}

/// Render with the default registry
pub fn render<'n>(input: impl Into<NodeInput<'n>>, on_action: SharedActionHandler) -> HostOutput {
    Renderer::with_default().render(input, on_action)
}
