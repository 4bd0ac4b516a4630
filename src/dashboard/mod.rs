//! Article-writing dashboard, as a host of the renderer
//!
//! [`Dashboard`] is plain in-memory state. [`Dashboard::tree`] turns it
//! into a node tree and [`Dashboard::handle_action`] is the host's switch
//! over action names. Nothing here knows about host elements: the two
//! halves meet only through node data and `(action, args)` pairs.
//!
//! ```text
//!   Dashboard ── tree() ──▶ Node ── Renderer ──▶ HostOutput
//!       ▲                                            │
//!       └──── handle_action(action, args) ◀── interaction
//! ```

mod tree;

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::{ActionHandler, SharedActionHandler};

/// Lifecycle of an article generation task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    /// Completed and failed tasks never move again
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub topic: String,
    pub keywords: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Top-level screens reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Create,
    Tasks,
    Archive,
}

impl View {
    pub const ALL: [View; 3] = [View::Create, View::Tasks, View::Archive];

    pub fn key(&self) -> &'static str {
        match self {
            View::Create => "create",
            View::Tasks => "tasks",
            View::Archive => "archive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Create => "New article",
            View::Tasks => "Tasks",
            View::Archive => "Archive",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.key() == key)
    }
}

/// Transient banner shown above the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: &'static str,
    pub text: String,
}

/// Markdown produced by `exportArticle`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub task_id: String,
    pub file_name: String,
    pub markdown: String,
}

/// In-memory dashboard state
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub user: Option<String>,
    pub view: View,
    pub tasks: Vec<Task>,
    /// Task whose article is open in the editor
    pub editing: Option<String>,
    /// Task awaiting delete confirmation
    pub pending_delete: Option<String>,
    pub notices: Vec<Notice>,
    pub last_export: Option<Export>,
    next_id: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new("Quill", Some("editor"))
    }
}

impl Dashboard {
    pub fn new(title: impl Into<String>, user: Option<&str>) -> Self {
        Self {
            title: title.into(),
            user: user.map(str::to_string),
            view: View::default(),
            tasks: Vec::new(),
            editing: None,
            pending_delete: None,
            notices: Vec::new(),
            last_export: None,
            next_id: 1,
        }
    }

    /// A dashboard with one task in every status, for demos and previews
    pub fn sample() -> Self {
        let mut dashboard = Self::default();
        let topics = [
            ("Ownership without tears", "borrowing, lifetimes"),
            ("Async Rust in production", "tokio, cancellation"),
            ("Error handling patterns", "thiserror, anyhow"),
            ("Writing a TUI with ratatui", "crossterm, layout"),
        ];
        for (topic, keywords) in topics {
            dashboard.create_task(topic, keywords);
        }
        dashboard.start_next();
        dashboard.start_next();
        dashboard.complete_task("task-1", None);
        dashboard.fail_task("task-2", Some("generation timed out"));
        dashboard.start_next();
        dashboard.view = View::Tasks;
        dashboard.notices.clear();
        dashboard
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    fn notify(&mut self, tone: &'static str, text: impl Into<String>) {
        self.notices.push(Notice {
            tone,
            text: text.into(),
        });
    }

    // ─────────────────────────────────────────────────────────────
    // Task lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Queue a new pending task; returns its id
    pub fn create_task(&mut self, topic: &str, keywords: &str) -> String {
        let id = format!("task-{}", self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id: id.clone(),
            topic: topic.to_string(),
            keywords: keywords.to_string(),
            status: TaskStatus::Pending,
            article: None,
            error: None,
        });
        self.notify("success", format!("Queued \"{}\"", topic));
        id
    }

    /// Move the oldest pending task to processing
    pub fn start_next(&mut self) -> Option<String> {
        let task = self.tasks.iter_mut().find(|t| t.status == TaskStatus::Pending)?;
        task.status = TaskStatus::Processing;
        tracing::debug!(task = %task.id, "task processing");
        Some(task.id.clone())
    }

    pub fn complete_task(&mut self, id: &str, article: Option<&str>) -> bool {
        let Some(task) = self.task_mut(id) else {
            return false;
        };
        if task.status.is_terminal() {
            return false;
        }
        task.status = TaskStatus::Completed;
        task.article = Some(match article {
            Some(text) => text.to_string(),
            None => draft_article(&task.topic, &task.keywords),
        });
        let topic = task.topic.clone();
        self.notify("success", format!("\"{}\" is ready", topic));
        true
    }

    pub fn fail_task(&mut self, id: &str, reason: Option<&str>) -> bool {
        let Some(task) = self.task_mut(id) else {
            return false;
        };
        if task.status.is_terminal() {
            return false;
        }
        task.status = TaskStatus::Failed;
        task.error = reason.map(str::to_string);
        let message = match reason {
            Some(reason) => format!("\"{}\" failed: {}", task.topic, reason),
            None => format!("\"{}\" failed", task.topic),
        };
        self.notify("error", message);
        true
    }

    // ─────────────────────────────────────────────────────────────
    // Host action switch
    // ─────────────────────────────────────────────────────────────

    /// Apply one dispatched intent; returns whether the name was known
    ///
    /// Trailing args carry values appended by components (row ids, form
    /// fields, draft text), so lookups read from the end where that holds.
    pub fn handle_action(&mut self, action: &str, args: &[Value]) -> bool {
        tracing::debug!(action, args = args.len(), "dashboard action");
        match action {
            "navigate" => {
                match last_str(args).and_then(View::from_key) {
                    Some(view) => self.view = view,
                    None => tracing::debug!(?args, "navigate to unknown view"),
                }
            }
            "createTask" => {
                let (topic, keywords) = match args {
                    [.., topic, keywords] => (as_text(topic), as_text(keywords)),
                    [topic] => (as_text(topic), None),
                    [] => (None, None),
                };
                match topic.filter(|t| !t.trim().is_empty()) {
                    Some(topic) => {
                        self.create_task(topic.trim(), keywords.unwrap_or("").trim());
                        self.view = View::Tasks;
                    }
                    None => self.notify("warning", "A topic is required"),
                }
            }
            "startTask" => {
                if self.start_next().is_none() {
                    self.notify("info", "Nothing pending");
                }
            }
            "cloneTask" => {
                if let Some(task) = last_str(args).and_then(|id| self.task(id)).cloned() {
                    self.create_task(&task.topic, &task.keywords);
                }
            }
            "requestDelete" => {
                self.pending_delete = last_str(args).filter(|id| self.task(id).is_some()).map(str::to_string);
            }
            "confirmDelete" => {
                if let Some(id) = self.pending_delete.take() {
                    self.tasks.retain(|t| t.id != id);
                    if self.editing.as_deref() == Some(id.as_str()) {
                        self.editing = None;
                    }
                    self.notify("info", "Task deleted");
                }
            }
            "cancelDelete" => self.pending_delete = None,
            "openEditor" => {
                let target = last_str(args)
                    .and_then(|id| self.task(id))
                    .map(|t| (t.id.clone(), t.topic.clone(), t.article.is_some()));
                match target {
                    Some((id, _, true)) => self.editing = Some(id),
                    Some((_, topic, false)) => self.notify("warning", format!("\"{}\" has no article yet", topic)),
                    None => {}
                }
            }
            "saveArticle" => {
                // `[id, draft]`, or just `[draft]` for the task being edited
                let declared = if args.len() >= 2 { first_str(args) } else { None };
                let id = declared.map(str::to_string).or_else(|| self.editing.clone());
                let text = last_str(args).map(str::to_string);
                if let (Some(id), Some(text)) = (id, text) {
                    if let Some(task) = self.task_mut(&id) {
                        task.article = Some(text);
                        self.editing = None;
                        self.notify("success", "Article saved");
                    }
                }
            }
            "closeEditor" => self.editing = None,
            "completeTask" => {
                if let Some(id) = first_str(args) {
                    let article = args.get(1).and_then(Value::as_str);
                    self.complete_task(id, article);
                }
            }
            "failTask" => {
                if let Some(id) = first_str(args) {
                    let reason = args.get(1).and_then(Value::as_str);
                    self.fail_task(id, reason);
                }
            }
            "exportArticle" => {
                if let Some(export) = last_str(args).and_then(|id| self.export(id)) {
                    let message = format!("Exported {}", export.file_name);
                    self.last_export = Some(export);
                    self.notify("info", message);
                }
            }
            "dismissNotice" => {
                let index = args.last().and_then(Value::as_u64).map(|i| i as usize);
                match index {
                    Some(i) if i < self.notices.len() => {
                        self.notices.remove(i);
                    }
                    _ => self.notices.clear(),
                }
            }
            "logout" => {
                self.user = None;
                self.editing = None;
                self.pending_delete = None;
                self.notices.clear();
                self.notify("info", "Signed out");
            }
            other => {
                tracing::debug!(action = other, "unknown action, ignoring");
                return false;
            }
        }
        true
    }

    /// Markdown document for a completed task
    pub fn export(&self, id: &str) -> Option<Export> {
        let task = self.task(id)?;
        let article = task.article.as_deref()?;
        let mut markdown = String::new();
        if !article.trim_start().starts_with('#') {
            markdown.push_str(&format!("# {}\n\n", task.topic));
        }
        markdown.push_str(article.trim_end());
        markdown.push('\n');
        if !task.keywords.is_empty() {
            markdown.push_str(&format!("\n_Keywords: {}_\n", task.keywords));
        }
        Some(Export {
            task_id: task.id.clone(),
            file_name: format!("{}.md", slug(&task.topic)),
            markdown,
        })
    }
}

fn as_text(value: &Value) -> Option<&str> {
    value.as_str()
}

fn first_str(args: &[Value]) -> Option<&str> {
    args.first().and_then(Value::as_str)
}

fn last_str(args: &[Value]) -> Option<&str> {
    args.last().and_then(Value::as_str)
}

fn slug(topic: &str) -> String {
    let mut slug = String::with_capacity(topic.len());
    for c in topic.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "article".to_string()
    } else {
        slug.to_string()
    }
}

/// Stand-in body until a generator fills the article in
fn draft_article(topic: &str, keywords: &str) -> String {
    let mut text = format!("# {}\n\nAn introduction to {}.\n", topic, topic.to_lowercase());
    let keywords: Vec<&str> = keywords.split(',').map(str::trim).filter(|k| !k.is_empty()).collect();
    if !keywords.is_empty() {
        text.push_str("\n## Key points\n\n");
        for keyword in keywords {
            text.push_str(&format!("- {}\n", keyword));
        }
    }
    text
}

// ═══════════════════════════════════════════════════════════════
// Shared handle
// ═══════════════════════════════════════════════════════════════

/// Dashboard behind a lock, usable as the render pass's action handler
#[derive(Clone, Default)]
pub struct SharedDashboard {
    inner: Arc<Mutex<Dashboard>>,
}

impl SharedDashboard {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dashboard)),
        }
    }

    pub fn handler(&self) -> SharedActionHandler {
        Arc::new(self.clone())
    }

    pub fn lock(&self) -> parking_lot::MutexGuard<'_, Dashboard> {
        self.inner.lock()
    }

    /// Current node tree
    pub fn tree(&self) -> crate::node::Node {
        self.inner.lock().tree()
    }
}

impl ActionHandler for SharedDashboard {
    fn on_action(&self, action: &str, args: &[Value]) {
        self.inner.lock().handle_action(action, args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_from_form_args() {
        let mut d = Dashboard::default();
        assert!(d.handle_action("createTask", &[json!("web"), json!("Rust"), json!("fast, safe")]));
        let task = &d.tasks[0];
        assert_eq!(task.topic, "Rust");
        assert_eq!(task.keywords, "fast, safe");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(d.view, View::Tasks);

        d.handle_action("createTask", &[json!("  ")]);
        assert_eq!(d.tasks.len(), 1);
        assert_eq!(d.notices.last().unwrap().tone, "warning");
    }

    #[test]
    fn test_lifecycle_is_monotonic() {
        let mut d = Dashboard::default();
        let id = d.create_task("Topic", "");
        assert_eq!(d.start_next(), Some(id.clone()));
        assert!(d.complete_task(&id, Some("body")));
        assert!(!d.fail_task(&id, None));
        assert_eq!(d.task(&id).unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut d = Dashboard::default();
        let id = d.create_task("Topic", "");
        d.handle_action("requestDelete", &[json!(id)]);
        assert_eq!(d.pending_delete.as_deref(), Some(id.as_str()));
        d.handle_action("cancelDelete", &[]);
        assert_eq!(d.tasks.len(), 1);

        d.handle_action("requestDelete", &[json!(id)]);
        d.handle_action("confirmDelete", &[]);
        assert!(d.tasks.is_empty());
        assert!(d.pending_delete.is_none());
    }

    #[test]
    fn test_editor_only_opens_for_articles() {
        let mut d = Dashboard::default();
        let id = d.create_task("Topic", "a, b");
        d.handle_action("openEditor", &[json!(id)]);
        assert!(d.editing.is_none());

        d.complete_task(&id, None);
        d.handle_action("openEditor", &[json!(id)]);
        assert_eq!(d.editing.as_deref(), Some(id.as_str()));

        d.handle_action("saveArticle", &[json!(id), json!("new body")]);
        assert_eq!(d.task(&id).unwrap().article.as_deref(), Some("new body"));
        assert!(d.editing.is_none());
    }

    #[test]
    fn test_save_with_draft_only_targets_open_editor() {
        let mut d = Dashboard::default();
        let id = d.create_task("Topic", "");
        d.complete_task(&id, Some("old body"));
        d.handle_action("openEditor", &[json!(id)]);

        d.handle_action("saveArticle", &[json!("draft without an id")]);
        assert_eq!(d.task(&id).unwrap().article.as_deref(), Some("draft without an id"));
        assert!(d.editing.is_none());
    }

    #[test]
    fn test_export_and_unknown_action() {
        let mut d = Dashboard::default();
        let id = d.create_task("Hello, World!", "greeting");
        d.complete_task(&id, Some("Body text"));
        d.handle_action("exportArticle", &[json!(id)]);

        let export = d.last_export.clone().unwrap();
        assert_eq!(export.file_name, "hello-world.md");
        assert!(export.markdown.starts_with("# Hello, World!\n\nBody text\n"));
        assert!(export.markdown.contains("_Keywords: greeting_"));

        let before = d.tasks.clone();
        assert!(!d.handle_action("launchRocket", &[json!(1)]));
        assert_eq!(d.tasks, before);
    }

    #[test]
    fn test_logout_and_navigation() {
        let mut d = Dashboard::sample();
        d.handle_action("navigate", &[json!("archive")]);
        assert_eq!(d.view, View::Archive);
        d.handle_action("navigate", &[json!("nowhere")]);
        assert_eq!(d.view, View::Archive);

        d.handle_action("logout", &[]);
        assert!(d.user.is_none());
        assert_eq!(d.notices.len(), 1);
    }

    #[test]
    fn test_sample_covers_every_status() {
        let d = Dashboard::sample();
        for status in [TaskStatus::Processing, TaskStatus::Completed, TaskStatus::Failed, TaskStatus::Pending] {
            assert_eq!(d.count(status), 1, "{}", status);
        }
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("  Rust & You "), "rust-you");
        assert_eq!(slug("!!!"), "article");
    }
}
