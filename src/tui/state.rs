//! Preview state - what is rendered, what has focus, what was dispatched

use std::sync::Arc;

use serde_json::Value;

use crate::dashboard::SharedDashboard;
use crate::host::HostOutput;
use crate::node::{ActionHandler, ActionLog, DispatchedAction, Node, SharedActionHandler};

/// Where the previewed tree comes from
#[derive(Clone)]
pub enum PreviewSource {
    /// Live dashboard: actions mutate it and the tree is rebuilt each frame
    Dashboard(SharedDashboard),
    /// Static nodes from a file: actions are only recorded
    Nodes(Vec<Node>),
}

impl PreviewSource {
    pub fn nodes(&self) -> Vec<Node> {
        match self {
            PreviewSource::Dashboard(dashboard) => vec![dashboard.tree()],
            PreviewSource::Nodes(nodes) => nodes.clone(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            PreviewSource::Dashboard(dashboard) => dashboard.lock().title.clone(),
            PreviewSource::Nodes(nodes) => format!("{} node(s)", nodes.len()),
        }
    }
}

/// Records every action, then forwards it to the source (if it listens)
#[derive(Clone)]
pub(crate) struct RecordingHandler {
    log: ActionLog,
    forward: Option<SharedActionHandler>,
}

impl RecordingHandler {
    pub fn new(source: &PreviewSource) -> Self {
        let forward = match source {
            PreviewSource::Dashboard(dashboard) => Some(dashboard.handler()),
            PreviewSource::Nodes(_) => None,
        };
        Self {
            log: ActionLog::new(),
            forward,
        }
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn shared(&self) -> SharedActionHandler {
        Arc::new(self.clone())
    }
}

impl ActionHandler for RecordingHandler {
    fn on_action(&self, action: &str, args: &[Value]) {
        self.log.on_action(action, args);
        if let Some(forward) = &self.forward {
            forward.on_action(action, args);
        }
    }
}

/// Mutable view state of the preview
#[derive(Debug, Default)]
pub struct PreviewState {
    /// Index into the current output's interactive elements
    pub focus: usize,
    /// Vertical scroll of the preview panel
    pub scroll: u16,
    pub show_help: bool,
    pub should_quit: bool,
    /// Output of the latest render pass; listeners live here
    pub output: HostOutput,
    pub interactive: Vec<Vec<usize>>,
}

impl PreviewState {
    /// Install a fresh render pass, keeping focus in range
    pub fn set_output(&mut self, output: HostOutput) {
        self.interactive = output.interactive_paths();
        self.output = output;
        if self.focus >= self.interactive.len() {
            self.focus = self.interactive.len().saturating_sub(1);
        }
    }

    pub fn focused_path(&self) -> Option<&[usize]> {
        self.interactive.get(self.focus).map(Vec::as_slice)
    }

    pub fn focus_next(&mut self) {
        if !self.interactive.is_empty() {
            self.focus = (self.focus + 1) % self.interactive.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.interactive.is_empty() {
            self.focus = (self.focus + self.interactive.len() - 1) % self.interactive.len();
        }
    }
}

/// One line of the activity panel
pub fn describe(entry: &DispatchedAction) -> String {
    let args: Vec<String> = entry.args.iter().map(short_value).collect();
    format!("#{} {}({})", entry.seq, entry.action, args.join(", "))
}

fn short_value(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 24 {
        let cut: String = text.chars().take(21).collect();
        format!("{}...", cut)
    } else {
        text
    }
}
