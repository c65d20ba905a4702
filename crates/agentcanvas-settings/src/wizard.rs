//! Interactive warehouse setup wizard.
//!
//! Prompts for the five connection values and produces a `WarehouseConfig`
//! ready to be written to the local `.env` file. Generic over its streams
//! so tests can drive it with in-memory buffers.

use std::io::{BufRead, Write};

use tracing::info;

use crate::config::WarehouseConfig;
use crate::error::SettingsError;

/// The interactive setup flow.
pub struct SetupWizard<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> SetupWizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs the prompts and returns the collected configuration.
    pub fn run(&mut self) -> Result<WarehouseConfig, SettingsError> {
        writeln!(self.output, "Databricks Analytics Setup")?;
        writeln!(self.output, "================================")?;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "This wizard configures the warehouse connection for the analytics dashboard."
        )?;
        writeln!(
            self.output,
            "You can find these values in your Databricks workspace:"
        )?;
        writeln!(
            self.output,
            "  1. Server Hostname: your workspace URL, e.g. adb-123.7.azuredatabricks.net"
        )?;
        writeln!(
            self.output,
            "  2. HTTP Path: SQL Warehouses -> your warehouse -> Connection Details"
        )?;
        writeln!(
            self.output,
            "  3. Access Token: User Settings -> Developer -> Access Tokens"
        )?;
        writeln!(self.output)?;

        let server_hostname = self.prompt("Enter your Databricks Server Hostname: ")?;
        let http_path = self.prompt("Enter your HTTP Path: ")?;
        let access_token = self.prompt("Enter your Access Token: ")?;
        let catalog = self.prompt_with_default("Enter Catalog", "main")?;
        let schema = self.prompt_with_default("Enter Schema", "default")?;

        let config = WarehouseConfig {
            server_hostname,
            http_path,
            access_token,
            catalog,
            schema,
        };
        info!("Setup wizard collected warehouse configuration");
        Ok(config)
    }

    fn prompt(&mut self, message: &str) -> Result<String, SettingsError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String, SettingsError> {
        let answer = self.prompt(&format!("{message} (default: {default}): "))?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_wizard_collects_all_values() {
        let input = Cursor::new("host.example\n/sql/1.0/warehouses/w1\ntoken123\nanalytics\nprod\n");
        let mut wizard = SetupWizard::new(input, Vec::new());
        let config = wizard.run().unwrap();

        assert_eq!(config.server_hostname, "host.example");
        assert_eq!(config.http_path, "/sql/1.0/warehouses/w1");
        assert_eq!(config.access_token, "token123");
        assert_eq!(config.catalog, "analytics");
        assert_eq!(config.schema, "prod");
        assert!(config.is_configured());
    }

    #[test]
    fn test_empty_answers_take_defaults() {
        let input = Cursor::new("host.example\n/sql/1.0/warehouses/w1\ntoken123\n\n\n");
        let mut wizard = SetupWizard::new(input, Vec::new());
        let config = wizard.run().unwrap();

        assert_eq!(config.catalog, "main");
        assert_eq!(config.schema, "default");
    }
}
