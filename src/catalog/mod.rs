//! Catalog - documentation table of known node types
//!
//! A catalog maps node type names to the shape a node of that type should
//! have. It is built once at startup and never gates rendering: the
//! registry decides how a node renders, the catalog only documents what it
//! should look like. Catalogs are merged so a deployment can extend the
//! standard surface without mutating it.

mod schema;
mod standard;

pub use schema::{IssueKind, NodeIssue, NodeValidator, Severity, ValidationReport};
pub use standard::{business_catalog, standard_catalog};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QuillError, Result};

/// Value kind of a documented property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    /// `{ action, args?, stopPropagation? }`
    Action,
    /// A nested node
    Node,
    #[default]
    Any,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::String => "string",
            PropertyKind::Number => "number",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Array => "array",
            PropertyKind::Object => "object",
            PropertyKind::Action => "action",
            PropertyKind::Node => "node",
            PropertyKind::Any => "any",
        }
    }
}

/// One documented property of a node type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PropertyDefinition {
    #[serde(rename = "type", default)]
    pub kind: PropertyKind,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// Allowed values (enumeration)
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl PropertyDefinition {
    pub fn new(kind: PropertyKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::new(PropertyKind::String, description)
    }

    pub fn number(description: impl Into<String>) -> Self {
        Self::new(PropertyKind::Number, description)
    }

    pub fn boolean(description: impl Into<String>) -> Self {
        Self::new(PropertyKind::Boolean, description)
    }

    pub fn array(description: impl Into<String>) -> Self {
        Self::new(PropertyKind::Array, description)
    }

    pub fn object(description: impl Into<String>) -> Self {
        Self::new(PropertyKind::Object, description)
    }

    pub fn action(description: impl Into<String>) -> Self {
        Self::new(PropertyKind::Action, description)
    }

    pub fn node(description: impl Into<String>) -> Self {
        Self::new(PropertyKind::Node, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Documented shape of one node type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Filled from the map key when loaded from a file
    #[serde(rename = "type", default)]
    pub node_type: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub properties: BTreeMap<String, PropertyDefinition>,

    #[serde(default, rename = "supportsChildren")]
    pub supports_children: bool,
}

impl CatalogEntry {
    pub fn new(
        node_type: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            node_type: node_type.into(),
            description: description.into(),
            category: category.into(),
            properties: BTreeMap::new(),
            supports_children: false,
        }
    }

    pub fn property(mut self, name: impl Into<String>, definition: PropertyDefinition) -> Self {
        self.properties.insert(name.into(), definition);
        self
    }

    pub fn with_children(mut self) -> Self {
        self.supports_children = true;
        self
    }

    /// Names of required properties, sorted
    pub fn required_properties(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|(_, def)| def.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Optional metadata for [`create_catalog`]
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Versioned table of node type → documented shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: String,
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub components: BTreeMap<String, CatalogEntry>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Catalog {
    /// Parse a catalog from YAML (JSON is valid YAML)
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let mut catalog: Catalog = serde_yaml::from_str(yaml)?;
        catalog.normalize();
        Ok(catalog)
    }

    /// Load an extension catalog file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(QuillError::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&content).map_err(|e| QuillError::CatalogParse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        tracing::debug!(
            path = %path.display(),
            id = %catalog.id,
            components = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Map keys are authoritative for entry types
    fn normalize(&mut self) {
        for (key, entry) in self.components.iter_mut() {
            if entry.node_type != *key {
                entry.node_type = key.clone();
            }
        }
    }

    pub fn add_component(&mut self, entry: CatalogEntry) {
        self.components.insert(entry.node_type.clone(), entry);
    }

    pub fn has_component(&self, node_type: &str) -> bool {
        self.components.contains_key(node_type)
    }

    pub fn get(&self, node_type: &str) -> Option<&CatalogEntry> {
        self.components.get(node_type)
    }

    /// Documented type names, sorted
    pub fn types(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Entries grouped by category, both levels sorted
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&CatalogEntry>> {
        let mut groups: BTreeMap<&str, Vec<&CatalogEntry>> = BTreeMap::new();
        for entry in self.components.values() {
            groups.entry(entry.category.as_str()).or_default().push(entry);
        }
        groups
    }

    /// Find similar type names (for "did you mean?" suggestions)
    pub fn find_similar(&self, node_type: &str, max_results: usize) -> Vec<&str> {
        let lower = node_type.to_lowercase();
        let mut scored: Vec<(usize, &str)> = self
            .components
            .keys()
            .filter_map(|k| {
                let candidate = k.to_lowercase();
                if candidate.contains(&lower) || lower.contains(&candidate) {
                    return Some((0, k.as_str()));
                }
                let distance = edit_distance(&lower, &candidate);
                (distance <= 2).then_some((distance, k.as_str()))
            })
            .collect();
        scored.sort();
        scored.into_iter().take(max_results).map(|(_, k)| k).collect()
    }
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut current = vec![i + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            current.push((prev[j] + cost).min(prev[j + 1] + 1).min(current[j] + 1));
        }
        prev = current;
    }
    prev[b.len()]
}

// ═══════════════════════════════════════════════════════════════
// Catalog operations
// ═══════════════════════════════════════════════════════════════

/// Empty catalog with metadata
pub fn create_catalog(id: impl Into<String>, name: impl Into<String>, options: CatalogOptions) -> Catalog {
    Catalog {
        id: id.into(),
        name: name.into(),
        version: options.version.unwrap_or_else(default_version),
        description: options.description.unwrap_or_default(),
        components: BTreeMap::new(),
    }
}

/// Insert or overwrite by type; last write wins
pub fn add_component_to_catalog(catalog: &mut Catalog, entry: CatalogEntry) {
    catalog.add_component(entry);
}

/// New catalog with `base`'s entries, then `extension`'s on top
///
/// The extension wins every key collision and supplies the metadata.
/// Neither input is modified.
pub fn merge_catalogs(base: &Catalog, extension: &Catalog) -> Catalog {
    let mut components = base.components.clone();
    for (node_type, entry) in &extension.components {
        if components.contains_key(node_type) {
            tracing::debug!(node_type = %node_type, extension = %extension.id, "catalog entry replaced by extension");
        }
        components.insert(node_type.clone(), entry.clone());
    }

    Catalog {
        id: extension.id.clone(),
        name: extension.name.clone(),
        version: extension.version.clone(),
        description: extension.description.clone(),
        components,
    }
}

pub fn catalog_has_component(catalog: &Catalog, node_type: &str) -> bool {
    catalog.has_component(node_type)
}

pub fn get_component_definition<'a>(catalog: &'a Catalog, node_type: &str) -> Option<&'a CatalogEntry> {
    catalog.get(node_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(node_type: &str, description: &str) -> CatalogEntry {
        CatalogEntry::new(node_type, "test", description)
    }

    #[test]
    fn test_create_catalog_defaults() {
        let catalog = create_catalog("std", "Standard", CatalogOptions::default());
        assert_eq!(catalog.version, "1.0");
        assert!(catalog.is_empty());

        let catalog = create_catalog(
            "ext",
            "Extension",
            CatalogOptions {
                version: Some("2.1".into()),
                description: Some("extras".into()),
            },
        );
        assert_eq!(catalog.version, "2.1");
        assert_eq!(catalog.description, "extras");
    }

    #[test]
    fn test_add_is_last_write_wins_and_idempotent() {
        let mut catalog = create_catalog("c", "C", CatalogOptions::default());
        add_component_to_catalog(&mut catalog, entry("button", "first"));
        add_component_to_catalog(&mut catalog, entry("button", "second"));
        add_component_to_catalog(&mut catalog, entry("button", "second"));

        assert_eq!(catalog.len(), 1);
        assert_eq!(get_component_definition(&catalog, "button").unwrap().description, "second");
    }

    #[test]
    fn test_merge_is_pure_and_extension_wins() {
        let mut base = create_catalog("base", "Base", CatalogOptions::default());
        add_component_to_catalog(&mut base, entry("a", "base a"));
        add_component_to_catalog(&mut base, entry("b", "base b"));

        let mut ext = create_catalog("ext", "Ext", CatalogOptions::default());
        add_component_to_catalog(&mut ext, entry("b", "ext b"));
        add_component_to_catalog(&mut ext, entry("c", "ext c"));

        let base_before = base.clone();
        let ext_before = ext.clone();
        let merged = merge_catalogs(&base, &ext);

        assert_eq!(merged.types(), vec!["a", "b", "c"]);
        assert_eq!(merged.get("b").unwrap().description, "ext b");
        assert_eq!(merged.id, "ext");
        assert_eq!(base, base_before);
        assert_eq!(ext, ext_before);
    }

    #[test]
    fn test_lookups_on_unknown_type() {
        let catalog = create_catalog("c", "C", CatalogOptions::default());
        assert!(!catalog_has_component(&catalog, "nope"));
        assert!(get_component_definition(&catalog, "nope").is_none());
    }

    #[test]
    fn test_from_yaml_fills_types_from_keys() {
        let yaml = r#"
id: article
name: Article widgets
components:
  articleCard:
    description: Summary card for one article
    category: business
    supportsChildren: true
    properties:
      title: { type: string, required: true }
      tone: { type: string, enum: [neutral, bold] }
      onOpen: { type: action }
"#;
        let catalog = Catalog::from_yaml(yaml).unwrap();
        let card = catalog.get("articleCard").unwrap();

        assert_eq!(catalog.version, "1.0");
        assert_eq!(card.node_type, "articleCard");
        assert!(card.supports_children);
        assert_eq!(card.required_properties(), vec!["title"]);
        assert_eq!(card.properties["onOpen"].kind, PropertyKind::Action);
        assert_eq!(card.properties["tone"].values.len(), 2);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Catalog::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert_eq!(err.code(), "QUILL-011");
    }

    #[test]
    fn test_find_similar() {
        let mut catalog = create_catalog("c", "C", CatalogOptions::default());
        for t in ["button", "badge", "statusBadge", "table"] {
            add_component_to_catalog(&mut catalog, entry(t, ""));
        }

        assert_eq!(catalog.find_similar("buton", 3), vec!["button"]);
        assert_eq!(catalog.find_similar("Badge", 3), vec!["badge", "statusBadge"]);
        assert!(catalog.find_similar("zzzzzz", 3).is_empty());
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("same", "same"), 0);
    }
}
