//! Dashboard state → node tree

use serde_json::{json, Value};

use super::{Dashboard, Task, TaskStatus, View};
use crate::node::{Action, Node};

const PAGE_SIZE: usize = 8;

impl Dashboard {
    /// The whole screen as one node tree rooted at `appShell`
    pub fn tree(&self) -> Node {
        let nav: Vec<Value> = View::ALL
            .iter()
            .map(|v| json!({"key": v.key(), "label": v.label()}))
            .collect();

        let body = match self.view {
            View::Create => self.create_view(),
            View::Tasks => self.tasks_view(),
            View::Archive => self.archive_view(),
        };

        Node::builder("appShell")
            .id("shell")
            .prop("title", self.title.as_str())
            .prop_opt("user", self.user.as_deref())
            .prop("nav", Value::Array(nav))
            .prop("active", self.view.key())
            .on("onNavigate", Action::new("navigate"))
            .on("onLogout", Action::new("logout"))
            .children(self.notice_nodes())
            .child(body)
            .child(self.confirm_node())
            .child(self.editor_node())
            .build()
    }

    fn notice_nodes(&self) -> Vec<Node> {
        self.notices
            .iter()
            .enumerate()
            .map(|(i, notice)| {
                Node::builder("alert")
                    .prop("tone", notice.tone)
                    .prop("text", notice.text.as_str())
                    .on("onClose", Action::new("dismissNotice").arg(i))
                    .build()
            })
            .collect()
    }

    fn stats(&self) -> Node {
        let stat = |label: &str, value: usize| {
            Node::builder("stat")
                .prop("label", label)
                .prop("value", value)
                .build()
        };
        Node::builder("grid")
            .prop("columns", 4)
            .child(stat("Tasks", self.tasks.len()))
            .child(stat("Processing", self.count(TaskStatus::Processing)))
            .child(stat("Completed", self.count(TaskStatus::Completed)))
            .child(stat("Failed", self.count(TaskStatus::Failed)))
            .build()
    }

    fn create_view(&self) -> Node {
        Node::builder("stack")
            .prop("gap", 16)
            .child(self.stats())
            .child(
                Node::builder("card")
                    .prop("title", "New article")
                    .prop("subtitle", "Describe the topic; the generator does the rest")
                    .child(
                        Node::builder("taskForm")
                            .id("task-form")
                            .prop("title", "Topic")
                            .on("onSubmit", Action::new("createTask"))
                            .build(),
                    )
                    .build(),
            )
            .build()
    }

    fn tasks_view(&self) -> Node {
        let rows: Vec<Value> = self.tasks.iter().map(task_row).collect();
        let columns = json!([
            {"key": "topic", "title": "Topic"},
            {"key": "keywords", "title": "Keywords"},
            {"key": "status", "title": "Status"}
        ]);

        let mut card = Node::builder("card")
            .prop("title", "Tasks")
            .prop("subtitle", format!("{} pending", self.count(TaskStatus::Pending)))
            .child(
                Node::builder("table")
                    .id("task-table")
                    .prop("columns", columns)
                    .prop("data", Value::Array(rows))
                    .prop("pageSize", PAGE_SIZE)
                    .prop("emptyText", "No tasks yet. Create one from New article.")
                    .on("onView", Action::new("openEditor").stop_propagation())
                    .on("onClone", Action::new("cloneTask").stop_propagation())
                    .on("onDelete", Action::new("requestDelete").stop_propagation())
                    .build(),
            );

        if self.count(TaskStatus::Pending) > 0 {
            card = card.child(
                Node::builder("button")
                    .prop("text", "Start next")
                    .prop("variant", "secondary")
                    .on("onClick", Action::new("startTask"))
                    .build(),
            );
        }

        let running: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Processing)
            .collect();
        let mut view = Node::builder("stack").prop("gap", 16).child(card.build());
        if !running.is_empty() {
            view = view.child(
                Node::builder("card")
                    .prop("title", "Generating")
                    .children(running.into_iter().map(queue_row))
                    .build(),
            );
        }
        view.build()
    }

    fn archive_view(&self) -> Node {
        let finished: Vec<Node> = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .map(article_card)
            .collect();

        if finished.is_empty() {
            return Node::builder("empty")
                .prop("text", "No finished articles yet")
                .prop("actionText", "Write one")
                .on("action", Action::new("navigate").arg(View::Create.key()))
                .build();
        }
        Node::builder("stack").prop("gap", 12).children(finished).build()
    }

    fn confirm_node(&self) -> Node {
        let topic = self
            .pending_delete
            .as_deref()
            .and_then(|id| self.task(id))
            .map(|t| t.topic.as_str());

        Node::builder("confirmDialog")
            .id("confirm-delete")
            .prop("open", topic.is_some())
            .prop("title", "Delete task?")
            .prop_opt(
                "message",
                topic.map(|t| format!("\"{}\" and its article will be removed.", t)),
            )
            .prop("confirmText", "Delete task")
            .on("onConfirm", Action::new("confirmDelete"))
            .on("onCancel", Action::new("cancelDelete"))
            .build()
    }

    fn editor_node(&self) -> Node {
        let task = self.editing.as_deref().and_then(|id| self.task(id));
        let mut editor = Node::builder("articleEditor")
            .id("article-editor")
            .prop("open", task.is_some())
            .on("onClose", Action::new("closeEditor"));
        if let Some(task) = task {
            editor = editor
                .prop("title", task.topic.as_str())
                .prop("content", task.article.clone().unwrap_or_default())
                .on("onSave", Action::new("saveArticle").arg(task.id.as_str()));
        }
        editor.build()
    }
}

fn task_row(task: &Task) -> Value {
    json!({
        "id": task.id,
        "topic": task.topic,
        "keywords": task.keywords,
        "status": task.status.as_str(),
    })
}

fn queue_row(task: &Task) -> Node {
    let button = |text: &str, variant: &str, action: Action| {
        Node::builder("button")
            .prop("text", text)
            .prop("variant", variant)
            .on("onClick", action)
            .build()
    };
    Node::builder("stack")
        .prop("direction", "horizontal")
        .prop("gap", 8)
        .child(Node::builder("text").prop("text", task.topic.as_str()).build())
        .child(button("Mark complete", "primary", Action::new("completeTask").arg(task.id.as_str())))
        .child(button(
            "Mark failed",
            "danger",
            Action::new("failTask").arg(task.id.as_str()).arg("cancelled by editor"),
        ))
        .build()
}

fn article_card(task: &Task) -> Node {
    let footer = Node::builder("stack")
        .prop("direction", "horizontal")
        .prop("gap", 8)
        .child(
            Node::builder("button")
                .prop("text", "Edit")
                .prop("variant", "secondary")
                .on("onClick", Action::new("openEditor").arg(task.id.as_str()))
                .build(),
        )
        .child(
            Node::builder("button")
                .prop("text", "Export")
                .prop("variant", "ghost")
                .on("onClick", Action::new("exportArticle").arg(task.id.as_str()))
                .build(),
        )
        .build();

    Node::builder("card")
        .id(format!("article-{}", task.id))
        .prop("title", task.topic.as_str())
        .prop_opt("subtitle", Some(task.keywords.as_str()).filter(|k| !k.is_empty()))
        .node_prop("footer", footer)
        .child(
            Node::builder("markdown")
                .prop("content", task.article.clone().unwrap_or_default())
                .build(),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{business_catalog, merge_catalogs, standard_catalog, NodeValidator};
    use crate::dashboard::SharedDashboard;
    use crate::host::HostEvent;
    use crate::registry::build_default_registry;
    use crate::render::Renderer;
    use std::sync::Arc;

    #[test]
    fn test_every_view_validates_against_catalog() {
        let validator = NodeValidator::new(merge_catalogs(&standard_catalog(), &business_catalog()));
        let mut dashboard = Dashboard::sample();
        dashboard.editing = Some("task-1".to_string());
        dashboard.pending_delete = Some("task-2".to_string());
        dashboard.notices.push(super::super::Notice {
            tone: "info",
            text: "hello".to_string(),
        });
        for view in View::ALL {
            dashboard.view = view;
            let report = validator.validate(&dashboard.tree()).unwrap();
            assert!(report.issues.is_empty(), "{:?}: {:?}", view, report.issues);
        }
    }

    #[test]
    fn test_delete_flow_through_rendered_tree() {
        let renderer = Renderer::new(Arc::new(build_default_registry()));
        let shared = SharedDashboard::new(Dashboard::sample());

        let out = renderer.render(&shared.tree(), shared.handler());
        let delete = out
            .find_path(|e| e.text.as_deref() == Some("Delete") && e.attr("data-row") == Some("task-4"))
            .unwrap();
        out.trigger(&delete, HostEvent::Click, None);
        assert_eq!(shared.lock().pending_delete.as_deref(), Some("task-4"));

        let out = renderer.render(&shared.tree(), shared.handler());
        assert!(out.text_content().contains("Delete task?"));
        out.trigger(&out.path_of_text("Delete task").unwrap(), HostEvent::Click, None);
        assert!(shared.lock().task("task-4").is_none());
    }

    #[test]
    fn test_archive_empty_state_navigates() {
        let renderer = Renderer::new(Arc::new(build_default_registry()));
        let shared = SharedDashboard::new(Dashboard::default());
        shared.lock().view = View::Archive;

        let out = renderer.render(&shared.tree(), shared.handler());
        out.trigger(&out.path_of_text("Write one").unwrap(), HostEvent::Click, None);
        assert_eq!(shared.lock().view, View::Create);
    }
}
