//! appShell - header, navigation sidebar and main area

use serde_json::Value;

use super::ComponentState;
use crate::host::{HostElement, HostEvent, HostOutput, Listener, Primitive};
use crate::render::{Component, RenderContext};

/// Application frame; the sidebar can be collapsed per shell instance
#[derive(Default)]
pub struct AppShell {
    collapsed: ComponentState<bool>,
}

impl Component for AppShell {
    fn render(&self, ctx: &RenderContext<'_>) -> HostOutput {
        let key = ctx.state_key();
        let collapsed = self.collapsed.get(&key);
        let title = ctx.node.text_prop("title").unwrap_or_else(|| "Dashboard".to_string());

        let toggle = {
            let state = self.collapsed.clone();
            let key = key.clone();
            HostElement::text(Primitive::Button, if collapsed { "☰ Menu" } else { "✕ Menu" })
                .with_class("q-btn q-btn-ghost")
                .with_attr("aria-expanded", (!collapsed).to_string())
                .with_listener(Listener::new(HostEvent::Click, move |_| {
                    state.update(&key, |c| *c = !*c);
                }))
        };

        let mut bar = HostElement::new(Primitive::Row)
            .with_child(HostElement::text(Primitive::Strong, title))
            .with_child(toggle);
        if let Some(user) = ctx.node.text_prop("user") {
            bar = bar.with_child(crate::components::muted(user));
        }
        if let Some(action) = ctx.node.action("onLogout") {
            bar = bar.with_child(
                HostElement::text(Primitive::Button, "Log out")
                    .with_class("q-btn q-btn-secondary")
                    .with_listener(ctx.listener(HostEvent::Click, action)),
            );
        }

        let mut body = HostElement::new(Primitive::Row).with_class("q-shell-body");
        if !collapsed {
            body = body.with_child(self.nav(ctx));
        }
        body = body.with_child(HostElement::new(Primitive::Main).with_children(ctx.children()));

        HostOutput::single(
            ctx.element(Primitive::Block)
                .with_class("q-shell")
                .with_child(HostElement::new(Primitive::Header).with_child(bar))
                .with_child(body),
        )
    }
}

impl AppShell {
    fn nav(&self, ctx: &RenderContext<'_>) -> HostElement {
        let active = ctx.node.text_prop("active");
        let on_navigate = ctx.node.action("onNavigate");

        let mut nav = HostElement::new(Primitive::Nav);
        for (key, label) in crate::components::options(ctx.node.array_prop("nav")) {
            let current = active.as_deref() == Some(key.as_str());
            let mut link = HostElement::text(Primitive::Link, label)
                .with_class(if current { "q-nav q-nav-active" } else { "q-nav" })
                .with_attr("data-key", key.as_str());
            if current {
                link = link.with_attr("aria-current", "page");
            }
            if let Some(action) = &on_navigate {
                link = link.with_listener(ctx.listener_with(HostEvent::Click, action.clone(), vec![Value::String(key)]));
            }
            nav = nav.with_child(link);
        }
        HostElement::new(Primitive::Aside).with_child(nav)
    }
}
