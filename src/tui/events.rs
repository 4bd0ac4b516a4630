//! Event Handling - Keyboard input processing

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the preview to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    FocusNext,
    FocusPrev,
    /// Click, toggle or cycle the focused element
    Activate,
    /// Type into the focused text field
    Insert(char),
    Backspace,
    ScrollUp,
    ScrollDown,
    Help,
    None,
}

/// Map a key to a command
///
/// While a text field has focus, printable keys are text: `q` types a `q`.
/// Esc and Ctrl+C always quit.
pub fn map_key(key: KeyEvent, editing_text: bool) -> Command {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => return Command::Quit,
        (_, KeyCode::Tab) => return Command::FocusNext,
        (_, KeyCode::BackTab) => return Command::FocusPrev,
        (_, KeyCode::Enter) => return Command::Activate,
        (_, KeyCode::F(1)) => return Command::Help,
        (_, KeyCode::PageUp) => return Command::ScrollUp,
        (_, KeyCode::PageDown) => return Command::ScrollDown,
        _ => {}
    }

    if editing_text {
        return match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Command::Insert(c),
            KeyCode::Backspace => Command::Backspace,
            KeyCode::Up => Command::FocusPrev,
            KeyCode::Down => Command::FocusNext,
            _ => Command::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('?') => Command::Help,
        KeyCode::Char(' ') => Command::Activate,
        KeyCode::Down | KeyCode::Char('j') => Command::FocusNext,
        KeyCode::Up | KeyCode::Char('k') => Command::FocusPrev,
        _ => Command::None,
    }
}

/// Poll for key presses with timeout (releases and repeats are dropped)
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(key(KeyCode::Char('q')), false), Command::Quit);
        assert_eq!(map_key(key(KeyCode::Esc), true), Command::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, true), Command::Quit);
    }

    #[test]
    fn test_text_field_captures_printable_keys() {
        assert_eq!(map_key(key(KeyCode::Char('q')), true), Command::Insert('q'));
        assert_eq!(map_key(key(KeyCode::Char(' ')), true), Command::Insert(' '));
        assert_eq!(map_key(key(KeyCode::Backspace), true), Command::Backspace);
        assert_eq!(map_key(key(KeyCode::Enter), true), Command::Activate);
    }

    #[test]
    fn test_focus_navigation() {
        assert_eq!(map_key(key(KeyCode::Tab), false), Command::FocusNext);
        assert_eq!(map_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), true), Command::FocusPrev);
        assert_eq!(map_key(key(KeyCode::Char('j')), false), Command::FocusNext);
        assert_eq!(map_key(key(KeyCode::Char('j')), true), Command::Insert('j'));
    }
}
