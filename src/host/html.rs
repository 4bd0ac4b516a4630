//! HTML backend
//!
//! Serializes a host tree to markup for the web dashboard. Listeners become
//! `data-action-<event>` attributes naming the dispatched action, so the page
//! script can post the intent back; no inline handlers are ever emitted.

use std::fmt::Write;

use serde_json::{Map, Value};

use super::{HostElement, HostOutput, Primitive};

impl HostOutput {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for element in self.elements() {
            write_element(element, &mut out);
        }
        out
    }
}

impl HostElement {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn write_element(element: &HostElement, out: &mut String) {
    let tag = element.primitive.tag();
    out.push('<');
    out.push_str(tag);

    if let Some(id) = &element.id {
        write_attr(out, "id", id);
    }

    let class = match (element.primitive.class(), element.class_name.as_deref()) {
        (Some(base), Some(extra)) => Some(format!("{} {}", base, extra)),
        (Some(base), None) => Some(base.to_string()),
        (None, Some(extra)) => Some(extra.to_string()),
        (None, None) => None,
    };
    if let Some(class) = class {
        write_attr(out, "class", &class);
    }

    if let Some(style) = element.style.as_ref().filter(|s| !s.is_empty()) {
        write_attr(out, "style", &style_to_css(style));
    }

    for (key, value) in &element.attrs {
        write_attr(out, key, value);
    }

    for listener in &element.listeners {
        if let Some(action) = &listener.action {
            write_attr(out, &format!("data-action-{}", listener.event), action);
        }
        if listener.stop_propagation {
            write_attr(out, &format!("data-stop-{}", listener.event), "true");
        }
    }

    // Void elements carry their text as a value/alt attribute
    if element.primitive.is_void() {
        if let Some(text) = &element.text {
            let key = if element.primitive == Primitive::Image { "alt" } else { "value" };
            write_attr(out, key, text);
        }
        out.push_str(" />");
        return;
    }

    out.push('>');
    if let Some(text) = &element.text {
        out.push_str(&escape_html(text));
    }
    for child in &element.children {
        write_element(child, out);
    }
    let _ = write!(out, "</{}>", tag);
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    let _ = write!(out, " {}=\"{}\"", key, escape_html(value));
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `{"marginTop": "4px", "zIndex": 2}` → `margin-top:4px;z-index:2;`
fn style_to_css(style: &Map<String, Value>) -> String {
    let mut entries: Vec<_> = style.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut css = String::new();
    for (key, value) in entries {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        let _ = write!(css, "{}:{};", kebab_case(key), value);
    }
    css
}

fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostEvent, Listener};
    use serde_json::json;

    #[test]
    fn test_escapes_text_and_attrs() {
        let el = HostElement::text(Primitive::Paragraph, "<b>\"hi\" & bye</b>").with_attr("title", "a\"b");
        assert_eq!(
            el.to_html(),
            "<p title=\"a&quot;b\">&lt;b&gt;&quot;hi&quot; &amp; bye&lt;/b&gt;</p>"
        );
    }

    #[test]
    fn test_listener_becomes_data_attribute() {
        let el = HostElement::text(Primitive::Button, "Delete").with_listener(
            Listener::new(HostEvent::Click, |_| {})
                .describing("requestDelete")
                .stopping(true),
        );
        assert_eq!(
            el.to_html(),
            "<button data-action-click=\"requestDelete\" data-stop-click=\"true\">Delete</button>"
        );
    }

    #[test]
    fn test_void_elements_and_style() {
        let mut input = HostElement::text(Primitive::Input, "draft").with_attr("placeholder", "Topic");
        input.style = json!({"marginTop": "4px", "flexGrow": 1}).as_object().cloned();
        assert_eq!(
            input.to_html(),
            "<input style=\"flex-grow:1;margin-top:4px;\" placeholder=\"Topic\" value=\"draft\" />"
        );
    }

    #[test]
    fn test_base_class_merges_with_class_name() {
        let card = HostElement::new(Primitive::Card).with_class("wide");
        assert_eq!(card.to_html(), "<div class=\"q-card wide\"></div>");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(kebab_case("color"), "color");
    }
}
