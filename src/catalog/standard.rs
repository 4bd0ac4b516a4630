//! Built-in catalogs
//!
//! `standard_catalog` documents the generic primitives, `business_catalog`
//! the dashboard components. The default registry merges the two.

use super::{
    add_component_to_catalog, create_catalog, Catalog, CatalogEntry, CatalogOptions, PropertyDefinition as P,
    PropertyKind,
};

const TONES: [&str; 5] = ["neutral", "success", "warning", "error", "info"];

/// Generic building blocks
pub fn standard_catalog() -> Catalog {
    let mut catalog = create_catalog(
        "quill.standard",
        "Standard components",
        CatalogOptions {
            version: Some("1.0".to_string()),
            description: Some("Generic layout, content, form and data primitives".to_string()),
        },
    );

    let entries = [
        // Layout
        CatalogEntry::new("container", "layout", "Generic wrapper around its children")
            .property("as", P::string("Landmark to render as").one_of(["main", "header", "nav", "aside"]))
            .with_children(),
        CatalogEntry::new("stack", "layout", "Vertical or horizontal run of children")
            .property(
                "direction",
                P::string("Main axis").one_of(["vertical", "horizontal"]).default_value("vertical"),
            )
            .property("gap", P::number("Spacing between children in pixels"))
            .property("align", P::string("Cross-axis alignment"))
            .with_children(),
        CatalogEntry::new("grid", "layout", "Equal-width column grid")
            .property("columns", P::number("Column count, 1 to 12").default_value(2))
            .with_children(),
        CatalogEntry::new("card", "layout", "Titled panel")
            .property("title", P::string("Heading text"))
            .property("subtitle", P::string("Secondary line under the title"))
            .property("footer", P::node("Node rendered in the footer row"))
            .property("onClick", P::action("Fired when the card is clicked"))
            .with_children(),
        CatalogEntry::new("divider", "layout", "Horizontal rule")
            .property("label", P::string("Accessible label")),
        // Content
        CatalogEntry::new("text", "content", "Inline text")
            .property("text", P::string("Content").required())
            .property("variant", P::string("Emphasis").one_of(["body", "muted", "strong", "code"])),
        CatalogEntry::new("heading", "content", "Section heading")
            .property("text", P::string("Content").required())
            .property("level", P::number("Heading level, 1 to 6").default_value(2)),
        CatalogEntry::new("markdown", "content", "Block-level markdown")
            .property("content", P::string("Markdown source").required()),
        CatalogEntry::new("badge", "content", "Small toned label")
            .property("text", P::string("Content").required())
            .property("tone", P::string("Semantic color").one_of(TONES)),
        CatalogEntry::new("link", "content", "Hyperlink")
            .property("text", P::string("Content"))
            .property("href", P::string("Target URL"))
            .property("onClick", P::action("Fired instead of navigating")),
        CatalogEntry::new("image", "content", "Image")
            .property("src", P::string("Image URL").required())
            .property("alt", P::string("Alternative text")),
        // Forms
        CatalogEntry::new("button", "form", "Clickable button")
            .property("text", P::string("Label").required())
            .property(
                "variant",
                P::string("Visual weight")
                    .one_of(["primary", "secondary", "danger", "ghost"])
                    .default_value("primary"),
            )
            .property("disabled", P::boolean("Ignore clicks"))
            .property("onClick", P::action("Fired on click")),
        CatalogEntry::new("input", "form", "Single-line text field")
            .property("name", P::string("Field name"))
            .property("label", P::string("Accessible label"))
            .property("value", P::string("Current value"))
            .property("placeholder", P::string("Hint shown when empty"))
            .property(
                "inputType",
                P::string("Input kind").one_of(["text", "email", "password", "number", "search", "url"]),
            )
            .property("required", P::boolean("Mark as required"))
            .property("onChange", P::action("Fired with the new value appended")),
        CatalogEntry::new("textarea", "form", "Multi-line text field")
            .property("name", P::string("Field name"))
            .property("label", P::string("Accessible label"))
            .property("value", P::string("Current value"))
            .property("placeholder", P::string("Hint shown when empty"))
            .property("rows", P::number("Visible rows").default_value(4))
            .property("onChange", P::action("Fired with the new value appended")),
        CatalogEntry::new("select", "form", "Drop-down choice")
            .property("options", P::array("Strings or {value, label} objects").required())
            .property("value", P::string("Selected value"))
            .property("name", P::string("Field name"))
            .property("label", P::string("Accessible label"))
            .property("onChange", P::action("Fired with the chosen value appended")),
        CatalogEntry::new("checkbox", "form", "Boolean toggle")
            .property("label", P::string("Accessible label"))
            .property("name", P::string("Field name"))
            .property("checked", P::boolean("Current state"))
            .property("onChange", P::action("Fired with the new state appended")),
        CatalogEntry::new("form", "form", "Field group with a submit button")
            .property("title", P::string("Heading text"))
            .property("submitText", P::string("Submit button label").default_value("Submit"))
            .property("onSubmit", P::action("Fired on submit"))
            .with_children(),
        // Data
        CatalogEntry::new("table", "data", "Tabular rows")
            .property("columns", P::array("Column keys or {key, title} objects"))
            .property("data", P::array("Row objects").required())
            .property("emptyText", P::string("Shown when there are no rows"))
            .property("onRowClick", P::action("Fired with the row id appended")),
        CatalogEntry::new("list", "data", "Bulleted list")
            .property("items", P::array("Plain entries"))
            .property("ordered", P::boolean("Numbered list"))
            .with_children(),
        CatalogEntry::new("stat", "data", "Metric tile")
            .property("label", P::string("Metric name").required())
            .property("value", P::new(PropertyKind::Any, "Metric value").required())
            .property("delta", P::number("Signed change since last period")),
        CatalogEntry::new("progress", "data", "Progress bar")
            .property("value", P::number("Current value").required())
            .property("max", P::number("Maximum").default_value(100))
            .property("label", P::string("Accessible label")),
        CatalogEntry::new("empty", "data", "Empty state")
            .property("text", P::string("Message"))
            .property("actionText", P::string("Call-to-action label"))
            .property("action", P::action("Call to action")),
        // Navigation and overlays
        CatalogEntry::new("tabs", "navigation", "Tab strip with a content panel")
            .property("items", P::array("{key, label} objects").required())
            .property("active", P::string("Key of the selected tab"))
            .property("onChange", P::action("Fired with the tab key appended"))
            .with_children(),
        CatalogEntry::new("alert", "feedback", "Toned banner")
            .property("tone", P::string("Semantic color").one_of(TONES))
            .property("title", P::string("Heading text"))
            .property("text", P::string("Message"))
            .property("onClose", P::action("Fired when dismissed"))
            .with_children(),
        CatalogEntry::new("modal", "overlay", "Dialog")
            .property("open", P::boolean("Visible").default_value(true))
            .property("title", P::string("Heading text"))
            .property("footer", P::node("Node rendered in the footer row"))
            .property("onClose", P::action("Fired when closed"))
            .with_children(),
    ];

    for entry in entries {
        add_component_to_catalog(&mut catalog, entry);
    }
    catalog
}

/// Article dashboard components
pub fn business_catalog() -> Catalog {
    let mut catalog = create_catalog(
        "quill.business",
        "Article dashboard components",
        CatalogOptions {
            version: Some("1.0".to_string()),
            description: Some("Application shell, task table and editor modals".to_string()),
        },
    );

    let entries = [
        CatalogEntry::new("appShell", "business", "Application frame with header and navigation")
            .property("title", P::string("Application name").required())
            .property("user", P::string("Signed-in user name"))
            .property("nav", P::array("{key, label} navigation items"))
            .property("active", P::string("Key of the current view"))
            .property("onNavigate", P::action("Fired with the item key appended"))
            .property("onLogout", P::action("Fired on logout"))
            .with_children(),
        CatalogEntry::new("table", "business", "Paginated task table with row actions")
            .property("columns", P::array("Column keys or {key, title} objects"))
            .property("data", P::array("Row objects with an id").required())
            .property("pageSize", P::number("Rows per page").default_value(10))
            .property("emptyText", P::string("Shown when there are no rows"))
            .property("onRowClick", P::action("Fired with the row id appended"))
            .property("onView", P::action("Fired with the row id appended"))
            .property("onClone", P::action("Fired with the row id appended"))
            .property("onDelete", P::action("Fired with the row id appended")),
        CatalogEntry::new("confirmDialog", "business", "Confirmation modal")
            .property("open", P::boolean("Visible"))
            .property("title", P::string("Heading text").default_value("Are you sure?"))
            .property("message", P::string("Body text"))
            .property("confirmText", P::string("Confirm label").default_value("Confirm"))
            .property("cancelText", P::string("Cancel label").default_value("Cancel"))
            .property("onConfirm", P::action("Fired on confirm"))
            .property("onCancel", P::action("Fired on cancel or close")),
        CatalogEntry::new("articleEditor", "business", "Modal editor holding a draft")
            .property("open", P::boolean("Visible"))
            .property("title", P::string("Article title"))
            .property("content", P::string("Initial article body"))
            .property("onSave", P::action("Fired with the draft appended"))
            .property("onClose", P::action("Fired on close")),
        CatalogEntry::new("taskForm", "business", "New article task form")
            .property("title", P::string("Heading text"))
            .property("submitText", P::string("Submit label").default_value("Generate"))
            .property("onSubmit", P::action("Fired with topic and keywords appended")),
        CatalogEntry::new("statusBadge", "business", "Task status badge")
            .property(
                "status",
                P::string("Task status")
                    .one_of(["pending", "processing", "completed", "failed"])
                    .required(),
            ),
    ];

    for entry in entries {
        add_component_to_catalog(&mut catalog, entry);
    }
    catalog
}
