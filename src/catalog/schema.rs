//! Development-time validation of node trees against a catalog
//!
//! Each catalog entry compiles to a JSON Schema over the node's
//! type-specific fields. [`NodeValidator`] walks a tree and reports issues;
//! it never gates rendering. Compiled validators are cached per type.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use jsonschema::Validator;
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{Catalog, CatalogEntry, PropertyDefinition, PropertyKind};
use crate::error::{QuillError, Result};
use crate::node::{Action, Node, NodeInput};

impl PropertyDefinition {
    /// JSON Schema fragment for this property
    pub fn to_json_schema(&self) -> Value {
        let mut schema = match self.kind {
            PropertyKind::String => json!({"type": "string"}),
            PropertyKind::Number => json!({"type": "number"}),
            PropertyKind::Boolean => json!({"type": "boolean"}),
            PropertyKind::Array => json!({"type": "array"}),
            PropertyKind::Object => json!({"type": "object"}),
            PropertyKind::Action => json!({
                "type": "object",
                "required": ["action"],
                "properties": {
                    "action": {"type": "string"},
                    "args": {"type": "array"},
                    "stopPropagation": {"type": "boolean"}
                }
            }),
            PropertyKind::Node => json!({
                "type": "object",
                "required": ["type"],
                "properties": {"type": {"type": "string"}}
            }),
            PropertyKind::Any => json!({}),
        };

        if let Some(obj) = schema.as_object_mut() {
            if !self.values.is_empty() {
                obj.insert("enum".to_string(), Value::Array(self.values.clone()));
            }
            if !self.description.is_empty() {
                obj.insert("description".to_string(), Value::String(self.description.clone()));
            }
        }
        schema
    }
}

impl CatalogEntry {
    /// Object schema over the type-specific fields; unknown fields allowed
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, def)| (name.clone(), def.to_json_schema()))
            .collect();

        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": self.node_type,
            "description": self.description,
            "type": "object",
            "properties": properties,
            "required": self.required_properties(),
            "additionalProperties": true
        })
    }
}

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// What kind of problem was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// Type not in the catalog (renders via the fallback)
    UnknownType,
    /// Children on a type that does not support them (ignored at render)
    UnexpectedChildren,
    /// Type-specific fields violate the catalog schema
    SchemaViolation,
    /// An `on*` field that is not a well-formed action
    MalformedAction,
}

/// One finding, located by node path (`/0/children/2`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeIssue {
    pub path: String,
    pub node_type: String,
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl NodeIssue {
    /// "Did you mean" hint, when there is one
    pub fn suggestion(&self) -> Option<String> {
        if self.suggestions.is_empty() {
            None
        } else {
            Some(format!("Did you mean: {}?", self.suggestions.join(", ")))
        }
    }
}

impl fmt::Display for NodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{} ({}): {}", path, self.node_type, self.message)
    }
}

/// Result of validating a tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub node_count: usize,
    pub issues: Vec<NodeIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &NodeIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &NodeIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// `Err(NodeValidationFailed)` when any error was found
    pub fn into_result(self) -> Result<Self> {
        let errors = self.errors().count();
        if errors > 0 {
            Err(QuillError::NodeValidationFailed { errors })
        } else {
            Ok(self)
        }
    }
}

/// Validates node trees against a catalog
pub struct NodeValidator {
    catalog: Arc<Catalog>,
    compiled: DashMap<String, Arc<Validator>>,
}

impl NodeValidator {
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            compiled: DashMap::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Compiled schema for a documented type (cached)
    pub fn schema_for(&self, node_type: &str) -> Result<Option<Arc<Validator>>> {
        if let Some(hit) = self.compiled.get(node_type) {
            return Ok(Some(Arc::clone(hit.value())));
        }
        let Some(entry) = self.catalog.get(node_type) else {
            return Ok(None);
        };

        let schema = entry.to_json_schema();
        let validator = jsonschema::validator_for(&schema).map_err(|e| QuillError::SchemaCompile {
            node_type: node_type.to_string(),
            details: e.to_string(),
        })?;
        let validator = Arc::new(validator);
        self.compiled.insert(node_type.to_string(), Arc::clone(&validator));
        Ok(Some(validator))
    }

    /// Walk every node in `input` and collect issues
    pub fn validate<'n>(&self, input: impl Into<NodeInput<'n>>) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();
        let mut failure = None;

        for (index, root) in input.into().as_slice().iter().enumerate() {
            root.walk(&mut |path, node| {
                if failure.is_some() {
                    return;
                }
                report.node_count += 1;
                let full_path = format!("/{}{}", index, path);
                if let Err(e) = self.check_node(&full_path, node, &mut report.issues) {
                    failure = Some(e);
                }
            });
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    fn check_node(&self, path: &str, node: &Node, issues: &mut Vec<NodeIssue>) -> Result<()> {
        let node_type = node.node_type();
        let issue = |kind: IssueKind, severity: Severity, message: String| NodeIssue {
            path: path.to_string(),
            node_type: node_type.to_string(),
            kind,
            severity,
            message,
            suggestions: Vec::new(),
        };

        let Some(entry) = self.catalog.get(node_type) else {
            let mut unknown = issue(
                IssueKind::UnknownType,
                Severity::Warning,
                format!("unknown node type '{}', will render as placeholder", node_type),
            );
            unknown.suggestions = self
                .catalog
                .find_similar(node_type, 3)
                .into_iter()
                .map(str::to_string)
                .collect();
            issues.push(unknown);
            return Ok(());
        };

        if !entry.supports_children && !node.child_nodes().is_empty() {
            issues.push(issue(
                IssueKind::UnexpectedChildren,
                Severity::Warning,
                format!("'{}' does not support children; they are ignored", node_type),
            ));
        }

        if let Some(validator) = self.schema_for(node_type)? {
            let instance = Value::Object(node.props.clone());
            for error in validator.iter_errors(&instance) {
                let location = error.instance_path.to_string();
                let message = if location.is_empty() {
                    error.to_string()
                } else {
                    format!("{}: {}", location, error)
                };
                issues.push(issue(IssueKind::SchemaViolation, Severity::Error, message));
            }
        }

        // Undocumented interaction fields still have to be actions
        for (key, value) in &node.props {
            if !is_interaction_field(key) || entry.properties.contains_key(key) || value.is_null() {
                continue;
            }
            if serde_json::from_value::<Action>(value.clone()).is_err() {
                issues.push(issue(
                    IssueKind::MalformedAction,
                    Severity::Error,
                    format!("'{}' is not an action ({{action, args?, stopPropagation?}})", key),
                ));
            }
        }
        Ok(())
    }
}

/// `onClick`, `onSave`, ... but not `once` or `online`
fn is_interaction_field(key: &str) -> bool {
    key.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}
