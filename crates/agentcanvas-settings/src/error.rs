//! Error types for the settings crate.

use std::io;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A required environment variable is absent or empty.
    #[error("Missing environment variable: {name}")]
    MissingVar { name: &'static str },

    /// An environment file line is not `KEY=VALUE`.
    #[error("Malformed line {line} in environment file: {content}")]
    MalformedLine { line: usize, content: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}
