//! Error handling for AgentCanvas
//!
//! Provides error types for the non-canvas layers of the application:
//! - Project errors (definition scanning, workflow file I/O)
//! - Analytics errors (statement execution, row decoding)
//!
//! Canvas model rejections are deliberately NOT errors: an invalid mutation
//! request (duplicate connection, move of a deleted item) is a benign
//! pointer-race outcome and is represented as a value in the designer crate.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Project persistence error type
///
/// Represents failures while scanning agent definitions or reading/writing
/// workflow layout files. Per-file read failures during a scan are degraded
/// to placeholders at the call site and never surface through this type.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// The agents directory could not be created
    #[error("Failed to create agents directory {}: {source}", path.display())]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A definition file could not be read
    #[error("Failed to read definition {}: {source}", path.display())]
    ReadDefinition {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A definition file did not contain valid JSON
    #[error("Malformed definition {}: {reason}", path.display())]
    MalformedDefinition {
        /// The file with invalid content.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// Generic project error
    #[error("Project error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Telemetry analytics error type
///
/// Represents failures of the warehouse query collaborator.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// The warehouse connection is not configured
    #[error("Warehouse not configured: missing {missing}")]
    NotConfigured {
        /// The environment variable that is absent.
        missing: String,
    },

    /// Statement execution failed at the transport layer
    #[error("Statement execution failed: {reason}")]
    Execution {
        /// Transport diagnostic.
        reason: String,
    },

    /// A returned row did not match the execution-record schema
    #[error("Row {index} does not match the execution record schema: {reason}")]
    RowDecode {
        /// Zero-based index of the row within the result set.
        index: usize,
        /// Decoder diagnostic.
        reason: String,
    },
}

/// Main error type for AgentCanvas
///
/// A unified error type for public APIs that cross crate boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// Project persistence error
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Analytics error
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
