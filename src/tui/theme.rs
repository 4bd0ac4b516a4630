//! Quill Theme - terminal palette
//!
//! Ink blue + parchment aesthetic shared by the terminal backend and the
//! preview TUI.

use ratatui::style::{Color, Modifier, Style};

/// Terminal color palette
#[derive(Debug, Clone, Copy)]
pub struct QuillTheme {
    pub ink_blue: Color,
    pub parchment: Color,
    pub quill_gold: Color,
    pub teal: Color,
    pub night: Color,

    // Tones
    pub success_green: Color,
    pub warning_orange: Color,
    pub error_red: Color,
    pub info_blue: Color,

    pub muted: Color,
}

impl Default for QuillTheme {
    fn default() -> Self {
        Self {
            ink_blue: Color::Rgb(76, 110, 245),     // #4C6EF5
            parchment: Color::Rgb(236, 230, 214),   // #ECE6D6
            quill_gold: Color::Rgb(230, 176, 60),   // #E6B03C
            teal: Color::Rgb(32, 201, 151),         // #20C997
            night: Color::Rgb(16, 18, 27),          // #10121B

            success_green: Color::Rgb(63, 185, 80),   // #3FB950
            warning_orange: Color::Rgb(210, 153, 34), // #D29922
            error_red: Color::Rgb(248, 81, 73),       // #F85149
            info_blue: Color::Rgb(88, 166, 255),      // #58A6FF

            muted: Color::Rgb(128, 128, 128),
        }
    }
}

impl QuillTheme {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.parchment)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Bold header style
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.ink_blue)
            .add_modifier(Modifier::BOLD)
    }

    /// Accent style (gold), used for actionable elements
    pub fn accent(&self) -> Style {
        Style::default().fg(self.quill_gold)
    }

    pub fn highlight(&self) -> Style {
        Style::default().fg(self.teal).add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success_green)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_orange)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tones (badges, alerts)
    // ─────────────────────────────────────────────────────────────────────

    /// Style for a semantic tone name (`success`, `warning`, `error`, `info`)
    pub fn tone(&self, tone: Option<&str>) -> Style {
        match tone {
            Some("success") => self.success(),
            Some("warning") => self.warning(),
            Some("error") | Some("danger") => self.error(),
            Some("info") => Style::default().fg(self.info_blue),
            _ => self.dimmed(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Chrome
    // ─────────────────────────────────────────────────────────────────────

    /// Border for the focused panel
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.quill_gold)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.ink_blue)
    }

    pub fn background(&self) -> Style {
        Style::default().bg(self.night)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_mapping() {
        let theme = QuillTheme::new();
        assert_eq!(theme.tone(Some("success")).fg, Some(theme.success_green));
        assert_eq!(theme.tone(Some("danger")).fg, Some(theme.error_red));
        assert_eq!(theme.tone(Some("whatever")).fg, Some(theme.muted));
        assert_eq!(theme.tone(None).fg, Some(theme.muted));
    }

    #[test]
    fn test_header_is_bold() {
        let theme = QuillTheme::new();
        assert!(theme.header().add_modifier.contains(Modifier::BOLD));
    }
}
