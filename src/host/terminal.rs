//! Terminal backend
//!
//! Flattens a host tree into styled ratatui [`Line`]s. Containers indent
//! their children, rows of leaf elements collapse onto one line, and the
//! focused interactive element (if any) is drawn reversed.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::{HostElement, HostOutput, Primitive};
use crate::tui::theme::QuillTheme;

const INDENT: &str = "  ";

impl HostOutput {
    /// Styled lines, no focus
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        self.to_lines_focused(None)
    }

    /// Styled lines with the element at `focused` highlighted
    pub fn to_lines_focused(&self, focused: Option<&[usize]>) -> Vec<Line<'static>> {
        let mut writer = LineWriter {
            theme: QuillTheme::default(),
            focused,
            lines: Vec::new(),
        };
        let mut path = Vec::new();
        for (i, element) in self.elements().iter().enumerate() {
            path.push(i);
            writer.block(element, 0, &mut path);
            path.pop();
        }
        writer.lines
    }

    /// Unstyled text, one line per terminal line
    pub fn to_plain_text(&self) -> String {
        self.to_lines()
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

struct LineWriter<'a> {
    theme: QuillTheme,
    focused: Option<&'a [usize]>,
    lines: Vec<Line<'static>>,
}

impl LineWriter<'_> {
    fn is_focused(&self, path: &[usize]) -> bool {
        self.focused == Some(path)
    }

    fn push(&mut self, depth: usize, spans: Vec<Span<'static>>) {
        let mut all = Vec::with_capacity(spans.len() + 1);
        if depth > 0 {
            all.push(Span::raw(INDENT.repeat(depth)));
        }
        all.extend(spans);
        self.lines.push(Line::from(all));
    }

    fn block(&mut self, element: &HostElement, depth: usize, path: &mut Vec<usize>) {
        match element.primitive {
            Primitive::Row if element.children.iter().all(is_leaf) => {
                let mut spans = Vec::new();
                for (i, child) in element.children.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::raw("  "));
                    }
                    path.push(i);
                    spans.extend(self.inline(child, path));
                    path.pop();
                }
                if !spans.is_empty() {
                    self.push(depth, spans);
                }
            }
            Primitive::TableRow => {
                let mut spans = Vec::new();
                for (i, cell) in element.children.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(" │ ", self.theme.dimmed()));
                    }
                    path.push(i);
                    spans.extend(self.cell(cell, path));
                    path.pop();
                }
                self.push(depth, spans);
            }
            Primitive::Divider => {
                self.push(depth, vec![Span::styled("─".repeat(40), self.theme.dimmed())]);
            }
            Primitive::Card | Primitive::Modal | Primitive::Alert | Primitive::Form | Primitive::Aside => {
                let title = element.text.clone().unwrap_or_default();
                let marker = match element.primitive {
                    Primitive::Modal => "▣ ",
                    Primitive::Alert => "! ",
                    _ => "▸ ",
                };
                let style = match element.primitive {
                    Primitive::Alert => self.theme.tone(element.attr("data-tone")),
                    _ => self.theme.header(),
                };
                if !title.is_empty() {
                    self.push(depth, vec![Span::styled(format!("{}{}", marker, title), style)]);
                }
                self.children(element, depth + 1, path);
            }
            Primitive::List => {
                for (i, item) in element.children.iter().enumerate() {
                    path.push(i);
                    let mut spans = vec![Span::styled("• ", self.theme.accent())];
                    if is_leaf(item) {
                        spans.extend(self.inline(item, path));
                        self.push(depth, spans);
                    } else {
                        self.push(depth, spans);
                        self.children(item, depth + 1, path);
                    }
                    path.pop();
                }
            }
            _ if is_leaf(element) => {
                let spans = self.inline(element, path);
                if !spans.is_empty() {
                    self.push(depth, spans);
                }
            }
            _ => {
                if let Some(text) = element.text.as_deref().filter(|t| !t.is_empty()) {
                    let style = self.text_style(element.primitive);
                    self.push(depth, vec![Span::styled(text.to_string(), style)]);
                }
                let child_depth = match element.primitive {
                    Primitive::Nav | Primitive::Table => depth + 1,
                    _ => depth,
                };
                self.children(element, child_depth, path);
            }
        }
    }

    fn children(&mut self, element: &HostElement, depth: usize, path: &mut Vec<usize>) {
        for (i, child) in element.children.iter().enumerate() {
            path.push(i);
            self.block(child, depth, path);
            path.pop();
        }
    }

    fn cell(&self, cell: &HostElement, path: &mut Vec<usize>) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        if let Some(text) = &cell.text {
            let style = if cell.primitive == Primitive::TableHeader {
                self.theme.header()
            } else {
                self.theme.text()
            };
            spans.push(Span::styled(text.clone(), style));
        }
        for (i, child) in cell.children.iter().enumerate() {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            path.push(i);
            spans.extend(self.inline(child, path));
            path.pop();
        }
        spans
    }

    /// Single-line rendering of a leaf element
    fn inline(&self, element: &HostElement, path: &mut Vec<usize>) -> Vec<Span<'static>> {
        let text = element.text.clone().unwrap_or_default();
        let focus = if self.is_focused(path) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        let span = match element.primitive {
            Primitive::Heading(level) => {
                let hashes = "#".repeat(usize::from(level.clamp(1, 6)));
                Span::styled(format!("{} {}", hashes, text), self.theme.header())
            }
            Primitive::Button => {
                let style = if element.attrs.contains_key("disabled") {
                    self.theme.dimmed()
                } else {
                    self.theme.accent()
                };
                Span::styled(format!("[ {} ]", text), style.patch(focus))
            }
            Primitive::Link => Span::styled(
                text,
                self.theme
                    .highlight()
                    .add_modifier(Modifier::UNDERLINED)
                    .patch(focus),
            ),
            Primitive::Input | Primitive::TextArea => {
                let label = element.attr("aria-label").map(|l| format!("{}: ", l)).unwrap_or_default();
                let shown = if text.is_empty() {
                    element.attr("placeholder").unwrap_or("").to_string()
                } else {
                    text
                };
                Span::styled(format!("{}[{:<16}]", label, shown), self.theme.text().patch(focus))
            }
            Primitive::Select => {
                let current = element
                    .children
                    .iter()
                    .find(|o| o.attrs.contains_key("selected"))
                    .and_then(|o| o.text.clone())
                    .unwrap_or(text);
                Span::styled(format!("< {} >", current), self.theme.text().patch(focus))
            }
            Primitive::Checkbox => {
                let mark = if element.attrs.contains_key("checked") { "x" } else { " " };
                let label = element.attr("aria-label").unwrap_or("").to_string();
                Span::styled(format!("[{}] {}", mark, label), self.theme.text().patch(focus))
            }
            Primitive::Badge => Span::styled(format!("[{}]", text), self.theme.tone(element.attr("data-tone"))),
            Primitive::Progress => {
                let value: f64 = element.attr("value").and_then(|v| v.parse().ok()).unwrap_or(0.0);
                let max: f64 = element.attr("max").and_then(|v| v.parse().ok()).unwrap_or(100.0);
                let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
                Span::styled(progress_bar(ratio, 20), self.theme.accent())
            }
            Primitive::Image => Span::styled(format!("[image: {}]", text), self.theme.dimmed()),
            Primitive::Placeholder => Span::styled(format!("⚠ {}", text), self.theme.warning()),
            Primitive::Divider => Span::styled("─".repeat(40), self.theme.dimmed()),
            other => {
                if text.is_empty() {
                    return Vec::new();
                }
                Span::styled(text, self.text_style(other))
            }
        };
        vec![span]
    }

    fn text_style(&self, primitive: Primitive) -> Style {
        match primitive {
            Primitive::Strong | Primitive::Header => self.theme.text().add_modifier(Modifier::BOLD),
            Primitive::Code => self.theme.accent(),
            Primitive::Label => self.theme.dimmed(),
            _ => self.theme.text(),
        }
    }
}

fn is_leaf(element: &HostElement) -> bool {
    element.children.is_empty() || element.primitive == Primitive::Select
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        (ratio * 100.0).round() as u32
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_of_buttons_is_one_line() {
        let out = HostOutput::single(
            HostElement::new(Primitive::Row)
                .with_child(HostElement::text(Primitive::Button, "Save"))
                .with_child(HostElement::text(Primitive::Button, "Cancel")),
        );
        assert_eq!(out.to_plain_text(), "[ Save ]  [ Cancel ]");
    }

    #[test]
    fn test_card_indents_children() {
        let out = HostOutput::single(
            HostElement::text(Primitive::Card, "Drafts")
                .with_child(HostElement::text(Primitive::Text, "nothing yet")),
        );
        assert_eq!(out.to_plain_text(), "▸ Drafts\n  nothing yet");
    }

    #[test]
    fn test_focus_reverses_only_target() {
        let out = HostOutput::from_elements(vec![
            HostElement::text(Primitive::Button, "A"),
            HostElement::text(Primitive::Button, "B"),
        ]);
        let lines = out.to_lines_focused(Some(&[1]));
        assert!(!lines[0].spans[0].style.add_modifier.contains(Modifier::REVERSED));
        assert!(lines[1].spans[0].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.5, 10), "[█████░░░░░]  50%");
        assert_eq!(progress_bar(1.0, 4), "[████] 100%");
    }

    #[test]
    fn test_table_rows_use_separators() {
        let out = HostOutput::single(
            HostElement::new(Primitive::Table)
                .with_child(
                    HostElement::new(Primitive::TableRow)
                        .with_child(HostElement::text(Primitive::TableHeader, "Topic"))
                        .with_child(HostElement::text(Primitive::TableHeader, "Status")),
                )
                .with_child(
                    HostElement::new(Primitive::TableRow)
                        .with_child(HostElement::text(Primitive::TableCell, "Rust"))
                        .with_child(HostElement::text(Primitive::TableCell, "done")),
                ),
        );
        assert_eq!(out.to_plain_text(), "  Topic │ Status\n  Rust │ done");
    }
}
