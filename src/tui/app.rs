//! Preview Application - terminal setup and run loop

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use serde_json::Value;

use super::events::{map_key, poll_event, Command};
use super::state::{describe, PreviewSource, PreviewState, RecordingHandler};
use super::theme::QuillTheme;
use crate::error::{QuillError, Result};
use crate::host::{HostElement, HostEvent, Primitive};
use crate::render::Renderer;

const ACTIVITY_LINES: usize = 200;

/// Interactive terminal preview of a node tree
pub struct PreviewApp {
    renderer: Renderer,
    source: PreviewSource,
    handler: RecordingHandler,
    state: PreviewState,
    theme: QuillTheme,
}

impl PreviewApp {
    pub fn new(renderer: Renderer, source: PreviewSource) -> Self {
        let handler = RecordingHandler::new(&source);
        let mut app = Self {
            renderer,
            source,
            handler,
            state: PreviewState::default(),
            theme: QuillTheme::new(),
        };
        app.refresh();
        app
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn activity(&self) -> Vec<String> {
        self.handler.log().entries().iter().map(describe).collect()
    }

    /// Re-run the render pass against the current source
    pub fn refresh(&mut self) {
        let nodes = self.source.nodes();
        let output = self.renderer.render(&nodes, self.handler.shared());
        self.state.set_output(output);
    }

    fn focused(&self) -> Option<&HostElement> {
        self.state.focused_path().and_then(|p| self.state.output.at(p))
    }

    /// Whether printable keys should go to the focused element
    pub fn editing_text(&self) -> bool {
        self.focused()
            .is_some_and(|e| matches!(e.primitive, Primitive::Input | Primitive::TextArea))
    }

    /// Apply one command; interactions re-render afterwards
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Quit => self.state.should_quit = true,
            Command::FocusNext => self.state.focus_next(),
            Command::FocusPrev => self.state.focus_prev(),
            Command::Help => self.state.show_help = !self.state.show_help,
            Command::ScrollUp => self.state.scroll = self.state.scroll.saturating_sub(5),
            Command::ScrollDown => self.state.scroll = self.state.scroll.saturating_add(5),
            Command::Activate => {
                self.activate();
                self.refresh();
            }
            Command::Insert(c) => {
                self.edit(|text| text.push(c));
                self.refresh();
            }
            Command::Backspace => {
                self.edit(|text| {
                    text.pop();
                });
                self.refresh();
            }
            Command::None => {}
        }
    }

    fn activate(&self) {
        let Some(path) = self.state.focused_path() else {
            return;
        };
        let Some(element) = self.state.output.at(path) else {
            return;
        };

        let outcome = match element.primitive {
            Primitive::Checkbox => {
                let checked = element.attrs.contains_key("checked");
                self.state.output.trigger(path, HostEvent::Change, Some(Value::Bool(!checked)))
            }
            Primitive::Select => match next_option(element) {
                Some(value) => self.state.output.trigger(path, HostEvent::Change, Some(Value::String(value))),
                None => return,
            },
            // Enter in a field submits the enclosing form, if there is one
            Primitive::Input | Primitive::TextArea => self.state.output.trigger(path, HostEvent::Submit, None),
            _ => self.state.output.trigger(path, HostEvent::Click, None),
        };
        tracing::debug!(?path, fired = outcome.fired, stopped = outcome.stopped, "preview interaction");
    }

    fn edit<F: FnOnce(&mut String)>(&self, change: F) {
        let Some(path) = self.state.focused_path() else {
            return;
        };
        let Some(element) = self.state.output.at(path) else {
            return;
        };
        if !matches!(element.primitive, Primitive::Input | Primitive::TextArea) {
            return;
        }
        let mut text = element.text.clone().unwrap_or_default();
        change(&mut text);
        self.state.output.trigger(path, HostEvent::Change, Some(Value::String(text)));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Terminal loop
    // ─────────────────────────────────────────────────────────────────────

    /// Run until the user quits; the terminal is restored on every exit path
    pub fn run(mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.main_loop(&mut terminal);
        let restored = restore_terminal(&mut terminal);
        result.and(restored)
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let tick_rate = Duration::from_millis(50);

        while !self.state.should_quit {
            terminal.draw(|frame| self.draw(frame)).map_err(terminal_error)?;
            if let Some(key) = poll_event(tick_rate).map_err(terminal_error)? {
                let command = map_key(key, self.editing_text());
                self.apply(command);
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(8),    // Preview + activity
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(chunks[1]);
        self.draw_preview(frame, body[0]);
        self.draw_activity(frame, body[1]);

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let focused = self
            .focused()
            .map(|e| e.text.clone().filter(|t| !t.is_empty()).unwrap_or_else(|| e.primitive.tag().to_string()))
            .unwrap_or_else(|| "nothing".to_string());

        let header = Line::from(vec![
            Span::styled("✒ QUILL PREVIEW", self.theme.header()),
            Span::raw("  │  "),
            Span::styled(self.source.title(), self.theme.accent()),
            Span::raw("  │  "),
            Span::styled(
                format!("{} interactive", self.state.interactive.len()),
                self.theme.text(),
            ),
            Span::raw("  │  "),
            Span::styled(format!("focus: {}", focused), self.theme.highlight()),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border());
        frame.render_widget(Paragraph::new(header).block(block), area);
    }

    fn draw_preview(&self, frame: &mut Frame, area: Rect) {
        let lines = if self.state.show_help {
            self.help_lines()
        } else {
            self.state.output.to_lines_focused(self.state.focused_path())
        };

        // Keep the focused line on screen
        let height = area.height.saturating_sub(2) as usize;
        let focus_line = lines.iter().position(|line| {
            line.spans
                .iter()
                .any(|s| s.style.add_modifier.contains(Modifier::REVERSED))
        });
        let auto = focus_line
            .map(|i| i.saturating_sub(height.saturating_sub(3)))
            .unwrap_or(0);
        let scroll = u16::try_from(auto).unwrap_or(u16::MAX).saturating_add(self.state.scroll);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_focused())
            .title(if self.state.show_help { " HELP " } else { " RENDERED " });
        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(self.theme.text())
            .scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_activity(&self, frame: &mut Frame, area: Rect) {
        let entries = self.activity();
        let height = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = if entries.is_empty() {
            vec![Line::from(Span::styled("No actions dispatched yet", self.theme.dimmed()))]
        } else {
            entries
                .iter()
                .rev()
                .take(height.min(ACTIVITY_LINES))
                .map(|text| Line::from(Span::styled(text.clone(), self.theme.text())))
                .collect()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(" ACTIONS ");
        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.editing_text() {
            "Type to edit  Enter submit  Tab next  Esc quit"
        } else {
            "Tab/j/k focus  Enter/Space activate  PgUp/PgDn scroll  F1 help  q quit"
        };
        frame.render_widget(Paragraph::new(Span::styled(hints, self.theme.dimmed())), area);
    }

    fn help_lines(&self) -> Vec<Line<'static>> {
        let rows = [
            ("Tab / Shift+Tab", "move focus between interactive elements"),
            ("Enter / Space", "click buttons and links, toggle checkboxes, cycle selects"),
            ("typing", "edits the focused input; Enter submits its form"),
            ("PgUp / PgDn", "scroll the rendered tree"),
            ("F1 / ?", "toggle this help"),
            ("q / Esc / Ctrl+C", "quit"),
        ];
        rows.iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(format!("{:<18}", keys), self.theme.accent()),
                    Span::styled(what.to_string(), self.theme.text()),
                ])
            })
            .collect()
    }
}

/// Value of the option after the selected one, wrapping
fn next_option(select: &HostElement) -> Option<String> {
    let values: Vec<&str> = select.children.iter().filter_map(|o| o.attr("value")).collect();
    if values.is_empty() {
        return None;
    }
    let current = select.children.iter().position(|o| o.attrs.contains_key("selected"));
    let next = current.map(|i| (i + 1) % values.len()).unwrap_or(0);
    values.get(next).map(|v| v.to_string())
}

fn terminal_error(e: io::Error) -> QuillError {
    QuillError::Terminal { reason: e.to_string() }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_error)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().map_err(terminal_error)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
    terminal.show_cursor().map_err(terminal_error)?;
    Ok(())
}
