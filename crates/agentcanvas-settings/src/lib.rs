//! # AgentCanvas Settings
//!
//! Environment-based warehouse configuration and the interactive setup
//! wizard that writes it. Configuration lives in five `DATABRICKS_*`
//! environment variables, optionally sourced from a local `.env` file.

pub mod config;
pub mod error;
pub mod wizard;

pub use config::WarehouseConfig;
pub use error::SettingsError;
pub use wizard::SetupWizard;
