//! # AgentCanvas Analytics
//!
//! The telemetry query collaborator: a single interface over the warehouse
//! that stores agent execution records, parameterized by connection config.
//! The canvas core never calls this; it serves the analytics surface only.
//!
//! Transport is a seam (`StatementExecutor`): the crate assembles the
//! fixed-column statements and decodes rows, while the actual wire protocol
//! lives behind the trait.

pub mod client;
pub mod query;
pub mod record;

pub use client::{StatementExecutor, TelemetryClient};
pub use query::{ExecutionQuery, QueryParam, Statement};
pub use record::{summarize, ExecutionRecord, ExecutionSummary};
