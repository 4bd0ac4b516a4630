//! Placeholder for node types nothing is registered for

use crate::host::{HostOutput, Primitive};

use super::{Component, RenderContext};

/// Visible, non-interactive stand-in naming the unknown type
///
/// Children of the unknown node are still rendered beneath it so a newer
/// producer's wrapper types do not hide content this renderer understands.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderComponent;

impl Component for PlaceholderComponent {
    fn render(&self, ctx: &RenderContext<'_>) -> HostOutput {
        let node_type = ctx.node.node_type();
        let element = ctx
            .element(Primitive::Placeholder)
            .with_text(format!("Unknown component: {}", node_type))
            .with_attr("data-node-type", node_type)
            .with_attr("role", "note");

        let mut output = HostOutput::single(element);
        output.extend(ctx.children());
        output
    }
}
