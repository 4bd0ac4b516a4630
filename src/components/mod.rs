//! Generic primitives (standard tier)
//!
//! Every component guards its own required fields: a missing or malformed
//! field renders a defensive default instead of failing the pass.

mod content;
mod data;
mod form;
mod layout;
mod overlay;

use std::sync::Arc;

use serde_json::Value;

use crate::host::{HostElement, HostOutput, Primitive};
use crate::registry::{ComponentRegistry, RegisterOptions};
use crate::render::RenderContext;

pub(crate) use data::{cell_text, empty_row, header_row, parse_columns, row_key, Column};

type RenderFn = fn(&RenderContext<'_>) -> HostOutput;

const STANDARD: &[(&str, RenderFn)] = &[
    ("container", layout::container),
    ("stack", layout::stack),
    ("grid", layout::grid),
    ("card", layout::card),
    ("divider", layout::divider),
    ("text", content::text),
    ("heading", content::heading),
    ("markdown", content::markdown),
    ("badge", content::badge),
    ("link", content::link),
    ("image", content::image),
    ("button", form::button),
    ("input", form::input),
    ("textarea", form::textarea),
    ("select", form::select),
    ("checkbox", form::checkbox),
    ("form", form::form),
    ("table", data::table),
    ("list", data::list),
    ("stat", data::stat),
    ("progress", data::progress),
    ("empty", data::empty),
    ("tabs", overlay::tabs),
    ("alert", overlay::alert),
    ("modal", overlay::modal),
];

/// Type names of the standard tier
pub fn standard_types() -> impl Iterator<Item = &'static str> {
    STANDARD.iter().map(|(node_type, _)| *node_type)
}

/// Register every generic primitive at priority 0, source `standard`
pub fn register_standard_components(registry: &mut ComponentRegistry) {
    for (node_type, render) in STANDARD {
        registry.register(*node_type, Arc::new(*render), RegisterOptions::default());
    }
}

/// Semantic tone, normalized; anything unrecognized reads as `neutral`
pub(crate) fn tone(value: Option<&str>) -> &'static str {
    match value {
        Some("success") => "success",
        Some("warning") => "warning",
        Some("error") | Some("danger") => "error",
        Some("info") => "info",
        _ => "neutral",
    }
}

/// `["a", {"value": "b", "label": "B"}]` → `[("a", "a"), ("b", "B")]`
pub(crate) fn options(values: &[Value]) -> Vec<(String, String)> {
    values
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some((s.clone(), s.clone())),
            Value::Number(n) => Some((n.to_string(), n.to_string())),
            Value::Object(map) => {
                let value = map
                    .get("value")
                    .or_else(|| map.get("key"))
                    .and_then(scalar_text)?;
                let label = map.get("label").and_then(scalar_text).unwrap_or_else(|| value.clone());
                Some((value, label))
            }
            _ => None,
        })
        .collect()
}

/// URL schemes a `link` or `image` may point at; scheme-less URLs are relative
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// `raw` trimmed when it is relative or uses an allowed scheme
pub(crate) fn safe_url(raw: &str) -> Option<&str> {
    let url = raw.trim();
    if url.chars().any(|c| c.is_control()) {
        tracing::debug!(url = raw, "dropping url with control characters");
        return None;
    }

    let scheme = url
        .find(|c| matches!(c, ':' | '/' | '?' | '#'))
        .filter(|&end| url[end..].starts_with(':'))
        .map(|end| &url[..end]);

    match scheme {
        None => Some(url),
        Some(scheme) if ALLOWED_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) => Some(url),
        Some(scheme) => {
            tracing::debug!(scheme, "dropping url with disallowed scheme");
            None
        }
    }
}

pub(crate) fn muted(text: impl Into<String>) -> HostElement {
    HostElement::text(Primitive::Text, text).with_class("q-muted")
}

pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use serde_json::Value;

    use crate::host::HostOutput;
    use crate::node::{ActionLog, Node};
    use crate::registry::build_default_registry;
    use crate::render::Renderer;

    /// Render one JSON node through a fresh default registry
    pub(crate) fn render(value: Value) -> (HostOutput, ActionLog) {
        let log = ActionLog::new();
        let node = Node::from_value(value).unwrap();
        let out = Renderer::new(Arc::new(build_default_registry())).render(&node, log.handler());
        (out, log)
    }
}
