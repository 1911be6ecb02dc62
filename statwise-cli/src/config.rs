//! Configuration loading from statwise.toml
//!
//! Statwise configuration can be specified in a `statwise.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the discovered configuration file
pub const CONFIG_FILE_NAME: &str = "statwise.toml";

/// Statwise configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatwiseConfig {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Report content configuration
    #[serde(default)]
    pub report: ReportConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Decimal places in human output
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            precision: default_precision(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_precision() -> usize {
    4
}

/// Report content configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Show step-by-step sums in human output
    #[serde(default = "default_include_intermediates")]
    pub include_intermediates: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_intermediates: default_include_intermediates(),
        }
    }
}

fn default_include_intermediates() -> bool {
    true
}

impl StatwiseConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Find the nearest `statwise.toml` walking up from `start`
    pub fn find_from(start: impl Into<PathBuf>) -> Option<PathBuf> {
        let mut dir = start.into();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let path = Self::find_from(std::env::current_dir().ok()?)?;
        match Self::load(&path) {
            Ok(config) => {
                tracing::debug!("Loaded configuration from {}", path.display());
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Statwise Configuration

[output]
# Default output format: human, json
format = "human"
# Decimal places in human output
precision = 4

[report]
# Show step-by-step sums (SS, df, rank sums, ...) in human output
include_intermediates = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StatwiseConfig::default();
        assert_eq!(config.output.format, "human");
        assert_eq!(config.output.precision, 4);
        assert!(config.report.include_intermediates);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [output]
            format = "json"
        "#;

        let config: StatwiseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, "json");
        // Defaults should still apply
        assert_eq!(config.output.precision, 4);
        assert!(config.report.include_intermediates);
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = StatwiseConfig::default_toml();
        let config: StatwiseConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.output.format, "human");
        assert_eq!(config.output.precision, 4);
    }

    #[test]
    fn test_find_from_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[report]\ninclude_intermediates = false\n",
        )
        .unwrap();

        let found = StatwiseConfig::find_from(&nested).unwrap();
        assert_eq!(found, root.path().join(CONFIG_FILE_NAME));

        let config = StatwiseConfig::load(&found).unwrap();
        assert!(!config.report.include_intermediates);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[output]\nprecision = \"many\"\n").unwrap();
        assert!(StatwiseConfig::load(&path).is_err());
    }
}
