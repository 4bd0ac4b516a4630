//! TUI Module - interactive preview
//!
//! Renders a node tree through the terminal backend and lets you drive it
//! from the keyboard. Every interaction goes through the same listeners a
//! web host would fire, and the dispatched actions show up in a side panel.
//!
//! Architecture:
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  PreviewSource (dashboard or static nodes)                   │
//! │        │ nodes()                         ▲ on_action         │
//! │        ▼                                 │                   │
//! │  Renderer ──▶ HostOutput ──▶ to_lines_focused ──▶ Frame       │
//! │                   │                                          │
//! │                   └── trigger(focused path) ◀── key press    │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
pub mod theme;

pub use app::PreviewApp;
pub use events::Command;
pub use state::{PreviewSource, PreviewState};
pub use theme::QuillTheme;

use crate::error::Result;
use crate::render::Renderer;

/// Run the preview until the user quits
pub fn run(renderer: Renderer, source: PreviewSource) -> Result<()> {
    PreviewApp::new(renderer, source).run()
}
