//! Content primitives: text, heading, markdown, badge, link, image

use crate::host::{HostElement, HostEvent, HostOutput, Primitive};
use crate::render::RenderContext;

/// `variant`: body (default), muted, strong, code
pub(super) fn text(ctx: &RenderContext<'_>) -> HostOutput {
    let content = ctx.node.text_prop("text").unwrap_or_default();
    let element = match ctx.node.str_prop("variant") {
        Some("strong") => ctx.element(Primitive::Strong),
        Some("code") => ctx.element(Primitive::Code),
        Some("muted") => ctx.element(Primitive::Text).with_class("q-muted"),
        _ => ctx.element(Primitive::Text),
    };
    HostOutput::single(element.with_text(content))
}

pub(super) fn heading(ctx: &RenderContext<'_>) -> HostOutput {
    let level = ctx
        .node
        .i64_prop("level")
        .and_then(|l| u8::try_from(l.clamp(1, 6)).ok())
        .unwrap_or(2);
    let content = ctx.node.text_prop("text").unwrap_or_default();
    HostOutput::single(ctx.element(Primitive::Heading(level)).with_text(content))
}

/// Block-level markdown subset: headings, bullet lists, fenced code, paragraphs
pub(super) fn markdown(ctx: &RenderContext<'_>) -> HostOutput {
    let source = ctx.node.str_prop("content").unwrap_or("");
    let element = ctx
        .element(Primitive::Block)
        .with_class("q-markdown")
        .with_children(markdown_blocks(source));
    HostOutput::single(element)
}

pub(super) fn badge(ctx: &RenderContext<'_>) -> HostOutput {
    let content = ctx.node.text_prop("text").unwrap_or_default();
    let tone = super::tone(ctx.node.str_prop("tone"));
    HostOutput::single(
        ctx.element(Primitive::Badge)
            .with_class(format!("q-tone-{}", tone))
            .with_attr("data-tone", tone)
            .with_text(content),
    )
}

/// Anchor; falls back to its href as text. An href with a disallowed
/// scheme is dropped and only the text renders.
pub(super) fn link(ctx: &RenderContext<'_>) -> HostOutput {
    let raw = ctx.node.str_prop("href");
    let content = ctx
        .node
        .text_prop("text")
        .or_else(|| raw.map(str::to_string))
        .unwrap_or_default();

    let href = raw.and_then(super::safe_url);
    if raw.is_some() && href.is_none() {
        return HostOutput::single(ctx.element(Primitive::Text).with_text(content));
    }

    let mut element = ctx.element(Primitive::Link).with_text(content);
    if let Some(href) = href {
        element = element.with_attr("href", href);
    }
    HostOutput::single(ctx.bind(element, HostEvent::Click, "onClick"))
}

/// Requires a relative or http(s) `src`; otherwise only the alt text renders
pub(super) fn image(ctx: &RenderContext<'_>) -> HostOutput {
    let alt = ctx.node.text_prop("alt").unwrap_or_default();
    let Some(src) = ctx.node.str_prop("src").filter(|s| !s.is_empty()) else {
        tracing::debug!("image without src, skipping");
        return HostOutput::empty();
    };
    match super::safe_url(src) {
        Some(src) => HostOutput::single(ctx.element(Primitive::Image).with_attr("src", src).with_text(alt)),
        None if alt.is_empty() => HostOutput::empty(),
        None => HostOutput::single(ctx.element(Primitive::Text).with_text(alt)),
    }
}

fn markdown_blocks(source: &str) -> Vec<HostElement> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut items: Vec<HostElement> = Vec::new();
    let mut code: Option<Vec<&str>> = None;

    fn flush(blocks: &mut Vec<HostElement>, paragraph: &mut Vec<&str>, items: &mut Vec<HostElement>) {
        if !paragraph.is_empty() {
            blocks.push(HostElement::text(Primitive::Paragraph, paragraph.join(" ")));
            paragraph.clear();
        }
        if !items.is_empty() {
            blocks.push(HostElement::new(Primitive::List).with_children(std::mem::take(items)));
        }
    }

    for line in source.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            match code.take() {
                Some(lines) => blocks.push(HostElement::text(Primitive::Code, lines.join("\n"))),
                None => {
                    flush(&mut blocks, &mut paragraph, &mut items);
                    code = Some(Vec::new());
                }
            }
            continue;
        }
        if let Some(lines) = code.as_mut() {
            lines.push(line);
            continue;
        }

        if trimmed.is_empty() {
            flush(&mut blocks, &mut paragraph, &mut items);
        } else if let Some((level, text)) = heading_line(trimmed) {
            flush(&mut blocks, &mut paragraph, &mut items);
            blocks.push(HostElement::text(Primitive::Heading(level), text));
        } else if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            if !paragraph.is_empty() {
                blocks.push(HostElement::text(Primitive::Paragraph, paragraph.join(" ")));
                paragraph.clear();
            }
            items.push(HostElement::text(Primitive::ListItem, item.trim()));
        } else {
            if !items.is_empty() {
                blocks.push(HostElement::new(Primitive::List).with_children(std::mem::take(&mut items)));
            }
            paragraph.push(trimmed);
        }
    }

    // Unterminated fence keeps its content
    if let Some(lines) = code {
        blocks.push(HostElement::text(Primitive::Code, lines.join("\n")));
    }
    flush(&mut blocks, &mut paragraph, &mut items);
    blocks
}

fn heading_line(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = line[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render;
    use serde_json::json;

    #[test]
    fn test_link_with_script_scheme_renders_text_only() {
        let (out, _) = render(json!({"type": "link", "text": "read", "href": "javascript:alert(document.cookie)"}));
        assert_eq!(out.elements()[0].primitive, Primitive::Text);
        assert_eq!(out.elements()[0].attr("href"), None);
        let html = out.to_html();
        assert!(!html.contains("javascript"), "{}", html);
        assert!(html.contains("read"));

        let (out, _) = render(json!({"type": "link", "text": "docs", "href": "https://example.com/docs"}));
        assert_eq!(out.elements()[0].primitive, Primitive::Link);
        assert_eq!(out.elements()[0].attr("href"), Some("https://example.com/docs"));
    }

    #[test]
    fn test_image_with_data_src_keeps_alt_only() {
        let (out, _) = render(json!({"type": "image", "src": "data:image/svg+xml,<svg/>", "alt": "chart"}));
        assert_eq!(out.elements()[0].primitive, Primitive::Text);
        assert_eq!(out.text_content(), "chart");
        assert!(!out.to_html().contains("data:"));

        let (out, _) = render(json!({"type": "image", "src": "/img/cover.png"}));
        assert_eq!(out.elements()[0].attr("src"), Some("/img/cover.png"));
    }

    #[test]
    fn test_text_stringifies_numbers() {
        let (out, _) = render(json!({"type": "text", "text": 42}));
        assert_eq!(out.text_content(), "42");
    }

    #[test]
    fn test_text_missing_field_renders_empty() {
        let (out, _) = render(json!({"type": "text"}));
        assert_eq!(out.len(), 1);
        assert_eq!(out.elements()[0].text.as_deref(), Some(""));
    }

    #[test]
    fn test_heading_level_clamped() {
        let (out, _) = render(json!({"type": "heading", "text": "Archive", "level": 9}));
        assert_eq!(out.elements()[0].primitive, Primitive::Heading(6));
        let (out, _) = render(json!({"type": "heading", "text": "Archive", "level": "big"}));
        assert_eq!(out.elements()[0].primitive, Primitive::Heading(2));
    }

    #[test]
    fn test_image_without_src_renders_nothing() {
        let (out, _) = render(json!({"type": "image", "alt": "cover"}));
        assert!(out.is_empty());
    }

    #[test]
    fn test_badge_tone_attr() {
        let (out, _) = render(json!({"type": "badge", "text": "new", "tone": "danger"}));
        assert_eq!(out.elements()[0].attr("data-tone"), Some("error"));
    }

    #[test]
    fn test_markdown_blocks() {
        let blocks = markdown_blocks("# Title\n\nFirst line\nsecond line\n\n- one\n- two\n\n```\nlet x = 1;\n```\nTail");
        let kinds: Vec<Primitive> = blocks.iter().map(|b| b.primitive).collect();
        assert_eq!(
            kinds,
            vec![
                Primitive::Heading(1),
                Primitive::Paragraph,
                Primitive::List,
                Primitive::Code,
                Primitive::Paragraph,
            ]
        );
        assert_eq!(blocks[1].text.as_deref(), Some("First line second line"));
        assert_eq!(blocks[2].children.len(), 2);
        assert_eq!(blocks[3].text.as_deref(), Some("let x = 1;"));
    }

    #[test]
    fn test_heading_line_requires_space() {
        assert_eq!(heading_line("## Sub"), Some((2, "Sub")));
        assert_eq!(heading_line("#tag"), None);
        assert_eq!(heading_line("####### seven"), None);
    }
}
