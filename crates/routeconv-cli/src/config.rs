// File: src/config.rs
// Purpose: Configuration parsing from routeconv.toml

use anyhow::{Context, Result};
use routeconv::TypeRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "routeconv.toml";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Extra or overriding `type name → regex` converters
    #[serde(default)]
    pub converters: BTreeMap<String, String>,

    #[serde(default)]
    pub convert: ConvertConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Defaults for `routeconv convert`, overridden by flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Example-value table (`RegEx,Name,Example`)
    #[serde(default)]
    pub examples: Option<PathBuf>,

    /// Where to write regexes lacking example values
    #[serde(default)]
    pub unknown_regexes: Option<PathBuf>,

    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter used when RUST_LOG is unset (default: "warn")
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_jobs() -> usize {
    1
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            examples: None,
            unknown_regexes: None,
            jobs: default_jobs(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a file that must exist
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        // Empty file means defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./routeconv.toml), if present
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Load from an explicit `--config` path, or fall back to the default file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load_default(),
        }
    }

    /// Built-in converters with the configured ones merged over them
    pub fn registry(&self) -> TypeRegistry {
        let mut registry = TypeRegistry::default();
        registry.extend(self.converters.clone());
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.converters.is_empty());
        assert_eq!(config.convert.jobs, 1);
        assert_eq!(config.convert.examples, None);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap_or_default();
        assert_eq!(config.convert.jobs, 1);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [converters]
            year = "[0-9]{4}"
            int = "[1-9][0-9]*"

            [convert]
            examples = "examples.csv"
            unknown_regexes = "unknown.csv"
            jobs = 4

            [log]
            level = "debug"
        "#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.convert.examples, Some(PathBuf::from("examples.csv")));
        assert_eq!(config.convert.unknown_regexes, Some(PathBuf::from("unknown.csv")));
        assert_eq!(config.convert.jobs, 4);
        assert_eq!(config.log.level, "debug");

        let registry = config.registry();
        assert_eq!(registry.regex_for("year"), Some("[0-9]{4}"));
        assert_eq!(registry.regex_for("int"), Some("[1-9][0-9]*"));
        assert_eq!(registry.regex_for("slug"), Some("[-a-zA-Z0-9_]+"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = Config::load(Some(Path::new("does/not/exist/routeconv.toml")));
        assert!(result.is_err());
    }
}
