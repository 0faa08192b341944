//! Configuration management for the mixing predictor

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub models: ModelsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Named models, display name -> local ONNX file path
    pub catalog: HashMap<String, String>,
    /// Catalog entry used when none is requested
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_onnx_threads() -> usize {
    1
}

fn default_model() -> String {
    "2L to 5L".to_string()
}

/// Result export configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Default path for CSV export when none is given on the command line
    pub csv_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Resolve a catalog name to its model path.
    pub fn resolve_model(&self, name: &str) -> Option<&str> {
        self.models.catalog.get(name).map(String::as_str)
    }

    /// Configured model names, sorted for stable display.
    pub fn catalog_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.catalog.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut catalog = HashMap::new();
        catalog.insert("2L to 5L".to_string(), "models/2l_5l.onnx".to_string());
        catalog.insert("10L to 20L".to_string(), "models/10l_20l.onnx".to_string());
        catalog.insert(
            "800L to 2000L".to_string(),
            "models/800l_2000l.onnx".to_string(),
        );

        Self {
            models: ModelsConfig {
                catalog,
                default_model: default_model(),
                onnx_threads: 1,
            },
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.models.catalog.len(), 3);
        assert_eq!(config.models.default_model, "2L to 5L");
        assert_eq!(config.models.onnx_threads, 1);
        assert!(config.resolve_model("2L to 5L").is_some());
        assert!(config.output.csv_path.is_none());
    }

    #[test]
    fn test_unknown_model_is_not_resolved() {
        let config = AppConfig::default();
        assert!(config.resolve_model("500L to 800L").is_none());
    }

    #[test]
    fn test_catalog_names_are_sorted() {
        let config = AppConfig::default();
        let names = config.catalog_names();

        assert_eq!(names, vec!["10L to 20L", "2L to 5L", "800L to 2000L"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[models]
default_model = "10L to 20L"
onnx_threads = 2

[models.catalog]
"10L to 20L" = "models/10l_20l.onnx"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();

        assert_eq!(config.models.default_model, "10L to 20L");
        assert_eq!(config.models.onnx_threads, 2);
        assert_eq!(
            config.resolve_model("10L to 20L"),
            Some("models/10l_20l.onnx")
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.output.csv_path.is_none());
    }
}
