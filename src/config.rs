//! Quill Configuration Module
//!
//! Renderer settings read from `quill.toml`.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Environment variables (`QUILL_DEV_MODE`, `QUILL_CATALOGS`, `QUILL_FALLBACK`, `QUILL_MAX_DEPTH`)
//! 2. Config file (`--config <path>`, else `./quill.toml`)
//! 3. Defaults

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QuillError, Result};
use crate::render::RenderLimits;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "quill.toml";

/// What happens to node types with no registered component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// Render a visible placeholder naming the type
    #[default]
    Placeholder,
    /// Render nothing (a warning is still logged)
    None,
}

impl FromStr for FallbackMode {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(FallbackMode::Placeholder),
            "none" | "off" => Ok(FallbackMode::None),
            other => Err(QuillError::ConfigError {
                reason: format!("Unknown fallback mode '{}' (expected placeholder or none)", other),
            }),
        }
    }
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackMode::Placeholder => f.write_str("placeholder"),
            FallbackMode::None => f.write_str("none"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuillConfig {
    /// Log catalog coverage gaps and validate trees before rendering
    pub dev_mode: bool,

    pub fallback: FallbackMode,

    /// Extension catalog files (YAML or JSON), merged in order
    pub catalogs: Vec<PathBuf>,

    /// Nesting depth at which rendering stops
    pub max_depth: usize,

    /// Log filter directive (e.g. `quill=debug`); `RUST_LOG` wins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            fallback: FallbackMode::default(),
            catalogs: Vec::new(),
            max_depth: RenderLimits::default().max_depth,
            log: None,
        }
    }
}

impl QuillConfig {
    /// Load from `path`, or `./quill.toml` when present, else defaults
    ///
    /// An explicit path must exist; the implicit one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let implicit = Path::new(CONFIG_FILE);
                if implicit.exists() {
                    Self::from_file(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| QuillError::ConfigError {
            reason: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| QuillError::ConfigError {
            reason: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        // Catalog paths are relative to the config file
        if let Some(base) = path.parent() {
            for catalog in &mut config.catalogs {
                if catalog.is_relative() {
                    *catalog = base.join(&*catalog);
                }
            }
        }
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Merge with environment variables
    ///
    /// Environment variables take precedence over config file values.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Same as [`with_env`](Self::with_env) with an injectable lookup
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = var("QUILL_DEV_MODE") {
            self.dev_mode = parse_flag(&value).ok_or_else(|| QuillError::ConfigError {
                reason: format!("QUILL_DEV_MODE must be true or false, got '{}'", value),
            })?;
        }

        if let Some(value) = var("QUILL_FALLBACK") {
            self.fallback = value.parse()?;
        }

        if let Some(value) = var("QUILL_MAX_DEPTH") {
            self.max_depth = value.trim().parse().map_err(|_| QuillError::ConfigError {
                reason: format!("QUILL_MAX_DEPTH must be a positive integer, got '{}'", value),
            })?;
        }

        // Appended after file catalogs so they win the merge
        if let Some(value) = var("QUILL_CATALOGS") {
            self.catalogs.extend(std::env::split_paths(&value));
        }

        Ok(self)
    }

    pub fn limits(&self) -> RenderLimits {
        RenderLimits {
            max_depth: self.max_depth,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = QuillConfig::default();
        assert!(!config.dev_mode);
        assert_eq!(config.fallback, FallbackMode::Placeholder);
        assert_eq!(config.max_depth, 64);
        assert!(config.catalogs.is_empty());
    }

    #[test]
    fn test_from_file_resolves_catalog_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quill.toml");
        fs::write(
            &path,
            "dev_mode = true\nfallback = \"none\"\ncatalogs = [\"ext.yaml\"]\nmax_depth = 12\n",
        )
        .unwrap();

        let config = QuillConfig::from_file(&path).unwrap();
        assert!(config.dev_mode);
        assert_eq!(config.fallback, FallbackMode::None);
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.catalogs, vec![dir.path().join("ext.yaml")]);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quill.toml");
        fs::write(&path, "max_depth = \"deep\"").unwrap();

        let err = QuillConfig::from_file(&path).unwrap_err();
        assert_eq!(err.code(), "QUILL-020");
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let dir = TempDir::new().unwrap();
        assert!(QuillConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = QuillConfig {
            catalogs: vec![PathBuf::from("a.yaml")],
            ..Default::default()
        }
        .with_env_from(env(&[
            ("QUILL_DEV_MODE", "yes"),
            ("QUILL_FALLBACK", "none"),
            ("QUILL_MAX_DEPTH", "8"),
            ("QUILL_CATALOGS", "b.yaml"),
        ]))
        .unwrap();

        assert!(config.dev_mode);
        assert_eq!(config.fallback, FallbackMode::None);
        assert_eq!(config.limits().max_depth, 8);
        assert_eq!(config.catalogs, vec![PathBuf::from("a.yaml"), PathBuf::from("b.yaml")]);
    }

    #[test]
    fn test_env_rejects_bad_values_and_ignores_empty() {
        let base = QuillConfig::default();
        assert!(base.clone().with_env_from(env(&[("QUILL_MAX_DEPTH", "-1")])).is_err());
        assert!(base.clone().with_env_from(env(&[("QUILL_FALLBACK", "loud")])).is_err());
        assert!(base.clone().with_env_from(env(&[("QUILL_DEV_MODE", "maybe")])).is_err());
        assert_eq!(base.clone().with_env_from(env(&[("QUILL_DEV_MODE", "  ")])).unwrap(), base);
    }
}
