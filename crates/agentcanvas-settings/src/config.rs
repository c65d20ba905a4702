//! Warehouse connection configuration.
//!
//! The analytics dashboard reads its warehouse connection from five
//! environment variables. `catalog` and `schema` default to `main` and
//! `default`; the other three are required before any connection attempt.
//! An unconfigured environment is a normal state, not an error: the
//! application simply runs without analytics.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

pub const ENV_SERVER_HOSTNAME: &str = "DATABRICKS_SERVER_HOSTNAME";
pub const ENV_HTTP_PATH: &str = "DATABRICKS_HTTP_PATH";
pub const ENV_ACCESS_TOKEN: &str = "DATABRICKS_ACCESS_TOKEN";
pub const ENV_CATALOG: &str = "DATABRICKS_CATALOG";
pub const ENV_SCHEMA: &str = "DATABRICKS_SCHEMA";

const DEFAULT_CATALOG: &str = "main";
const DEFAULT_SCHEMA: &str = "default";

/// Connection settings for the telemetry warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseConfig {
    pub server_hostname: String,
    pub http_path: String,
    pub access_token: String,
    pub catalog: String,
    pub schema: String,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            server_hostname: String::new(),
            http_path: String::new(),
            access_token: String::new(),
            catalog: DEFAULT_CATALOG.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}

impl WarehouseConfig {
    /// Reads the configuration from the process environment. Optional
    /// variables fall back to their defaults; required ones must be present
    /// and non-empty.
    pub fn from_env() -> Result<Self, SettingsError> {
        let config = Self::from_lookup(|name| std::env::var(name).ok());
        match config.missing_var() {
            Some(name) => Err(SettingsError::MissingVar { name }),
            None => Ok(config),
        }
    }

    /// Like `from_env`, but an unconfigured environment yields `None`
    /// instead of an error.
    pub fn maybe_from_env() -> Option<Self> {
        Self::from_env().ok()
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Self {
        let var = |name| lookup(name).filter(|value: &String| !value.is_empty());
        Self {
            server_hostname: var(ENV_SERVER_HOSTNAME).unwrap_or_default(),
            http_path: var(ENV_HTTP_PATH).unwrap_or_default(),
            access_token: var(ENV_ACCESS_TOKEN).unwrap_or_default(),
            catalog: var(ENV_CATALOG).unwrap_or_else(|| DEFAULT_CATALOG.to_string()),
            schema: var(ENV_SCHEMA).unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
        }
    }

    /// The first required variable that is not set, if any.
    pub fn missing_var(&self) -> Option<&'static str> {
        if self.server_hostname.is_empty() {
            Some(ENV_SERVER_HOSTNAME)
        } else if self.http_path.is_empty() {
            Some(ENV_HTTP_PATH)
        } else if self.access_token.is_empty() {
            Some(ENV_ACCESS_TOKEN)
        } else {
            None
        }
    }

    /// All three required variables are present.
    pub fn is_configured(&self) -> bool {
        self.missing_var().is_none()
    }

    /// Renders the `.env` file content for this configuration.
    pub fn render_env_file(&self) -> String {
        format!(
            "# Databricks Configuration\n\
             {ENV_SERVER_HOSTNAME}={}\n\
             {ENV_HTTP_PATH}={}\n\
             {ENV_ACCESS_TOKEN}={}\n\
             {ENV_CATALOG}={}\n\
             {ENV_SCHEMA}={}\n",
            self.server_hostname, self.http_path, self.access_token, self.catalog, self.schema
        )
    }

    /// Writes the `.env` file to the given path.
    pub fn write_env_file(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.render_env_file())?;
        Ok(())
    }

    /// Loads the configuration from a `.env` file. Blank lines and `#`
    /// comments are ignored; anything else must be `KEY=VALUE`.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let vars = parse_env_content(&content)?;
        Ok(Self::from_lookup(|name| vars.get(name).cloned()))
    }
}

fn parse_env_content(content: &str) -> Result<HashMap<String, String>, SettingsError> {
    let mut vars = HashMap::new();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => {
                vars.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                return Err(SettingsError::MalformedLine {
                    line: index + 1,
                    content: raw.to_string(),
                });
            }
        }
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WarehouseConfig {
        WarehouseConfig {
            server_hostname: "adb-1234.7.azuredatabricks.net".into(),
            http_path: "/sql/1.0/warehouses/abc123".into(),
            access_token: "dapi-secret".into(),
            catalog: "main".into(),
            schema: "default".into(),
        }
    }

    #[test]
    fn test_env_file_round_trip() {
        let config = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");

        config.write_env_file(&path).unwrap();
        let loaded = WarehouseConfig::from_env_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_required_var_reported() {
        let mut config = sample();
        config.access_token.clear();
        assert!(!config.is_configured());
        assert_eq!(config.missing_var(), Some(ENV_ACCESS_TOKEN));
    }

    #[test]
    fn test_parse_tolerates_comments_and_blanks() {
        let content = "# comment\n\nDATABRICKS_CATALOG = analytics \n";
        let vars = parse_env_content(content).unwrap();
        assert_eq!(vars.get(ENV_CATALOG).map(String::as_str), Some("analytics"));
    }

    #[test]
    fn test_parse_rejects_garbage_line() {
        let err = parse_env_content("not a key value pair").unwrap_err();
        assert!(matches!(err, SettingsError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_defaults_applied_when_optional_vars_absent() {
        let config = WarehouseConfig::from_lookup(|name| match name {
            ENV_SERVER_HOSTNAME => Some("host".into()),
            ENV_HTTP_PATH => Some("/sql/1.0/warehouses/x".into()),
            ENV_ACCESS_TOKEN => Some("token".into()),
            _ => None,
        });
        assert!(config.is_configured());
        assert_eq!(config.catalog, "main");
        assert_eq!(config.schema, "default");
    }
}
