//! Catalog loading, merging and node validation

use pretty_assertions::assert_eq;
use quill::catalog::{business_catalog, standard_catalog, CatalogOptions, IssueKind, Severity};
use quill::{
    add_component_to_catalog, catalog_has_component, create_catalog, get_component_definition, merge_catalogs,
    Catalog, CatalogEntry, Node, NodeValidator, PropertyDefinition, PropertyKind,
};
use serde_json::json;

const ACME: &str = r#"
id: acme
name: Acme widgets
version: "2.1"
components:
  sparkline:
    description: Tiny inline chart
    category: data
    properties:
      points:
        type: array
        required: true
      tone:
        type: string
        enum: [info, success]
  button:
    description: Acme button
    category: form
    properties:
      text:
        type: string
"#;

#[test]
fn test_yaml_catalog_takes_types_from_keys() {
    let catalog = Catalog::from_yaml(ACME).unwrap();
    assert_eq!(catalog.id, "acme");
    assert_eq!(catalog.version, "2.1");
    assert_eq!(catalog.types(), vec!["button", "sparkline"]);

    let sparkline = catalog.get("sparkline").unwrap();
    assert_eq!(sparkline.node_type, "sparkline");
    assert_eq!(sparkline.properties["points"].kind, PropertyKind::Array);
    assert_eq!(sparkline.required_properties(), vec!["points"]);
    assert!(!sparkline.supports_children);
}

#[test]
fn test_merge_extension_wins_and_inputs_untouched() {
    let base = standard_catalog();
    let extension = Catalog::from_yaml(ACME).unwrap();
    let base_before = base.clone();

    let merged = merge_catalogs(&base, &extension);

    assert_eq!(merged.id, "acme");
    assert_eq!(merged.len(), base.len() + 1);
    assert_eq!(merged.get("button").unwrap().description, "Acme button");
    assert!(catalog_has_component(&merged, "sparkline"));
    assert!(catalog_has_component(&merged, "card"));

    assert_eq!(base, base_before);
    assert!(!catalog_has_component(&base, "sparkline"));
}

#[test]
fn test_add_component_last_write_wins() {
    let mut catalog = create_catalog(
        "local",
        "Local",
        CatalogOptions {
            version: Some("0.1".into()),
            description: None,
        },
    );
    add_component_to_catalog(&mut catalog, CatalogEntry::new("chip", "content", "first"));
    add_component_to_catalog(
        &mut catalog,
        CatalogEntry::new("chip", "content", "second").property("label", PropertyDefinition::string("Text")),
    );

    assert_eq!(catalog.len(), 1);
    let chip = get_component_definition(&catalog, "chip").unwrap();
    assert_eq!(chip.description, "second");
    assert!(chip.properties.contains_key("label"));
    assert!(get_component_definition(&catalog, "missing").is_none());
}

#[test]
fn test_standard_and_business_catalogs_do_not_overlap_except_table() {
    let standard = standard_catalog();
    let business = business_catalog();
    let shared: Vec<_> = business
        .types()
        .into_iter()
        .filter(|t| standard.has_component(t))
        .collect();
    assert_eq!(shared, vec!["table"]);
}

#[test]
fn test_validation_collects_every_issue_kind() {
    let validator = NodeValidator::new(merge_catalogs(&standard_catalog(), &business_catalog()));
    let tree = Node::from_value(json!({
        "type": "stack",
        "children": [
            {"type": "buton", "text": "typo"},
            {"type": "button", "variant": "huge", "text": "Go"},
            {"type": "text", "text": "leaf", "children": [{"type": "text", "text": "ignored"}]},
            {"type": "card", "onHover": "not an action"},
            {"type": "badge"}
        ]
    }))
    .unwrap();

    let report = validator.validate(&tree).unwrap();
    let kinds: Vec<_> = report.issues.iter().map(|i| (i.path.as_str(), i.kind.clone())).collect();

    assert!(kinds.contains(&("/0/children/0", IssueKind::UnknownType)));
    assert!(kinds.contains(&("/0/children/1", IssueKind::SchemaViolation)));
    assert!(kinds.contains(&("/0/children/2", IssueKind::UnexpectedChildren)));
    assert!(kinds.contains(&("/0/children/3", IssueKind::MalformedAction)));
    assert!(kinds.contains(&("/0/children/4", IssueKind::SchemaViolation)));

    let typo = report.issues.iter().find(|i| i.kind == IssueKind::UnknownType).unwrap();
    assert_eq!(typo.severity, Severity::Warning);
    assert_eq!(typo.suggestion().as_deref(), Some("Did you mean: button?"));

    assert!(!report.is_valid());
    assert!(report.into_result().is_err());
}

#[test]
fn test_validator_accepts_extension_types_after_merge() {
    let merged = merge_catalogs(&standard_catalog(), &Catalog::from_yaml(ACME).unwrap());
    let validator = NodeValidator::new(merged);

    let good = Node::from_value(json!({"type": "sparkline", "points": [1, 2], "tone": "info"})).unwrap();
    let bad = Node::from_value(json!({"type": "sparkline", "tone": "loud"})).unwrap();

    assert!(validator.validate(&good).unwrap().issues.is_empty());
    let report = validator.validate(&bad).unwrap();
    assert_eq!(report.errors().count(), 2);
}
