//! Configuration for the proxy server and the report command

use anyhow::{Context, Result};
use finance_core::{ExpensePolicy, Schema, SchemaSettings};
use serde::Deserialize;
use shared::CONFIG;
use std::path::{Path, PathBuf};
use std::time::Duration;

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml; every section is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub source: SourceConfig,
    pub server: ServerConfig,
    pub schema: SchemaConfig,
}

/// Upstream spreadsheet endpoint
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// Request timeout; no timeout when absent
    pub timeout_secs: Option<u64>,
}

/// Proxy listener
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built web app (trunk `dist/`) served next to the API route
    pub site_dir: Option<PathBuf>,
}

/// Column names and the negative-value policy
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub year_key: String,
    pub income_key: String,
    pub expense_policy: ExpensePolicy,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: CONFIG.upstream_url.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            site_dir: None,
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            year_key: CONFIG.schema.year_key.to_string(),
            income_key: CONFIG.schema.income_key.to_string(),
            expense_policy: if CONFIG.schema.positive_expenses_only {
                ExpensePolicy::PositiveOnly
            } else {
                ExpensePolicy::Signed
            },
        }
    }
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| {
            "Invalid config. Check for:\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
             - Incorrect data types (strings vs numbers)\n\
             - expense_policy other than \"positive-only\" or \"signed\"\n\n\
             See config.toml.example for the expected format."
        })
    }

    /// A missing file is only an error when it was asked for explicitly
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl SchemaConfig {
    pub fn schema(&self) -> Schema {
        Schema::new(&self.year_key, &self.income_key)
    }

    /// What the proxy publishes to the browser
    pub fn settings(&self) -> SchemaSettings {
        SchemaSettings::new(&self.year_key, &self.income_key, self.expense_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FileConfig::parse("").unwrap();
        assert_eq!(config.source.url, CONFIG.upstream_url);
        assert_eq!(config.source.timeout(), None);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.schema.expense_policy, ExpensePolicy::PositiveOnly);
        assert_eq!(config.schema.schema(), Schema::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = FileConfig::parse(
            r#"
            [source]
            timeout_secs = 15

            [schema]
            income_key = "salário"
            expense_policy = "signed"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.url, CONFIG.upstream_url);
        assert_eq!(config.source.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.schema.year_key, "YEAR");
        assert_eq!(config.schema.schema().income_key(), "SALÁRIO");
        assert_eq!(config.schema.expense_policy, ExpensePolicy::Signed);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let result = FileConfig::parse("[schema]\nexpense_policy = \"sometimes\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_handling() {
        let path = std::env::temp_dir().join("finance-dash-missing-config.toml");
        assert!(FileConfig::load_or_default(&path, false).is_ok());
        assert!(FileConfig::load_or_default(&path, true).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("finance-dash-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 8080\nsite_dir = \"dist\"\n").unwrap();

        let config = FileConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.site_dir, Some(PathBuf::from("dist")));
    }
}
