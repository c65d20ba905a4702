//! Warehouse client over a pluggable statement transport.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use agentcanvas_core::AnalyticsError;
use agentcanvas_settings::WarehouseConfig;

use crate::query::{ExecutionQuery, Statement};
use crate::record::ExecutionRecord;

/// Transport seam: executes one parameterized statement against the
/// configured warehouse and returns rows as JSON objects keyed by column.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(
        &self,
        config: &WarehouseConfig,
        statement: &Statement,
    ) -> Result<Vec<Value>, AnalyticsError>;
}

/// The telemetry query collaborator: one client, parameterized by
/// connection config, replacing per-surface SQL wrappers.
#[derive(Debug)]
pub struct TelemetryClient<E> {
    config: WarehouseConfig,
    executor: E,
}

impl<E: StatementExecutor> TelemetryClient<E> {
    /// Binds a configuration to a transport. Fails up front when required
    /// connection values are absent, so surfaces can fall back to an
    /// "analytics not configured" notice instead of failing per query.
    pub fn new(config: WarehouseConfig, executor: E) -> Result<Self, AnalyticsError> {
        if let Some(missing) = config.missing_var() {
            return Err(AnalyticsError::NotConfigured {
                missing: missing.to_string(),
            });
        }
        Ok(Self { config, executor })
    }

    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }

    /// Runs a query and decodes the result set. Rows that do not match the
    /// fixed schema are skipped, not fatal.
    pub async fn executions(
        &self,
        query: &ExecutionQuery,
    ) -> Result<Vec<ExecutionRecord>, AnalyticsError> {
        let statement = query.statement();
        debug!(params = statement.params.len(), "Executing telemetry query");
        let rows = self.executor.execute(&self.config, &statement).await?;
        Ok(ExecutionRecord::from_rows(&rows))
    }

    /// The most recent executions across all agents.
    pub async fn recent_executions(
        &self,
        limit: i64,
    ) -> Result<Vec<ExecutionRecord>, AnalyticsError> {
        self.executions(&ExecutionQuery::all().limit(limit)).await
    }
}
