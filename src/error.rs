//! Error types with codes and fix suggestions
//!
//! Error code ranges:
//! - QUILL-000-009: Node tree parsing
//! - QUILL-010-019: Catalog loading and schema compilation
//! - QUILL-020-029: Configuration
//! - QUILL-030-039: Terminal preview
//!
//! Rendering itself never fails. These errors only surface at the edges
//! where files are read or parsed.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuillError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum QuillError {
    // ─────────────────────────────────────────────────────────────
    // Node tree errors (QUILL-000 to QUILL-009)
    // ─────────────────────────────────────────────────────────────
    #[error("[QUILL-001] Failed to parse node tree: {details}")]
    NodeParse { details: String },

    #[error("[QUILL-002] Node file not found: {path}")]
    NodeFileNotFound { path: PathBuf },

    #[error("[QUILL-003] Node tree failed validation with {errors} error(s)")]
    NodeValidationFailed { errors: usize },

    // ─────────────────────────────────────────────────────────────
    // Catalog errors (QUILL-010 to QUILL-019)
    // ─────────────────────────────────────────────────────────────
    #[error("[QUILL-010] Failed to parse catalog {path}: {details}")]
    CatalogParse { path: PathBuf, details: String },

    #[error("[QUILL-011] Catalog file not found: {path}")]
    CatalogNotFound { path: PathBuf },

    #[error("[QUILL-012] Schema for '{node_type}' does not compile: {details}")]
    SchemaCompile { node_type: String, details: String },

    // ─────────────────────────────────────────────────────────────
    // Config errors (QUILL-020 to QUILL-029)
    // ─────────────────────────────────────────────────────────────
    #[error("[QUILL-020] Configuration error: {reason}")]
    ConfigError { reason: String },

    // ─────────────────────────────────────────────────────────────
    // Terminal errors (QUILL-030 to QUILL-039)
    // ─────────────────────────────────────────────────────────────
    #[error("[QUILL-030] Terminal error: {reason}")]
    Terminal { reason: String },

    #[error("[QUILL-090] IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuillError {
    /// Stable error code, e.g. `QUILL-001`
    pub fn code(&self) -> &'static str {
        match self {
            Self::NodeParse { .. } => "QUILL-001",
            Self::NodeFileNotFound { .. } => "QUILL-002",
            Self::NodeValidationFailed { .. } => "QUILL-003",
            Self::CatalogParse { .. } => "QUILL-010",
            Self::CatalogNotFound { .. } => "QUILL-011",
            Self::SchemaCompile { .. } => "QUILL-012",
            Self::ConfigError { .. } => "QUILL-020",
            Self::Terminal { .. } => "QUILL-030",
            Self::Io(_) => "QUILL-090",
        }
    }
}

impl FixSuggestion for QuillError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            QuillError::NodeParse { .. } => {
                Some("Every node needs a string 'type'; children must be a node or a list of nodes")
            }
            QuillError::NodeFileNotFound { .. } => Some("Check the file path exists"),
            QuillError::NodeValidationFailed { .. } => {
                Some("Run 'quill catalog' to see the properties each node type expects")
            }
            QuillError::CatalogParse { .. } => {
                Some("Catalog files need id, name and a components map keyed by node type")
            }
            QuillError::CatalogNotFound { .. } => {
                Some("Fix the path in quill.toml 'catalogs' or QUILL_CATALOGS")
            }
            QuillError::SchemaCompile { .. } => {
                Some("Check enumeration values and defaults in the catalog entry")
            }
            QuillError::ConfigError { .. } => Some("Check quill.toml syntax and field names"),
            QuillError::Terminal { .. } => Some("Run the preview in an interactive terminal"),
            QuillError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
