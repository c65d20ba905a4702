//! The execution-record schema.
//!
//! One row per agent execution, projected straight out of the warehouse's
//! `agent_executions` table. The schema is fixed: `COLUMNS` is the single
//! source of truth for statement assembly, and the serde field names match
//! it so rows decode without any mapping layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use agentcanvas_core::AnalyticsError;

/// One agent execution as recorded in the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub agent_name: String,
    pub execution_timestamp: String,
    #[serde(default)]
    pub execution_date: String,
    #[serde(default)]
    pub execution_duration_ms: f64,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub total_events: i64,
    #[serde(default)]
    pub total_tool_calls: i64,
    #[serde(default)]
    pub total_llm_calls: i64,
    #[serde(default)]
    pub avg_tool_call_duration_ms: f64,
    #[serde(default)]
    pub avg_llm_call_duration_ms: f64,
    #[serde(default)]
    pub total_tokens_used: i64,
    #[serde(default)]
    pub prompt_tokens_used: i64,
    #[serde(default)]
    pub completion_tokens_used: i64,
    #[serde(default)]
    pub tokens_per_second: f64,
    #[serde(default)]
    pub cost_estimate_usd: f64,
    #[serde(default)]
    pub tools_used_count: i64,
    #[serde(default)]
    pub tools_used_list: Option<String>,
    #[serde(default)]
    pub most_used_tool: Option<String>,
    #[serde(default)]
    pub llm_model_used: Option<String>,
    #[serde(default)]
    pub efficiency_score: f64,
}

impl ExecutionRecord {
    /// The projected columns, in SELECT order.
    pub const COLUMNS: &'static [&'static str] = &[
        "agent_name",
        "execution_timestamp",
        "execution_date",
        "execution_duration_ms",
        "success",
        "error_message",
        "error_type",
        "total_events",
        "total_tool_calls",
        "total_llm_calls",
        "avg_tool_call_duration_ms",
        "avg_llm_call_duration_ms",
        "total_tokens_used",
        "prompt_tokens_used",
        "completion_tokens_used",
        "tokens_per_second",
        "cost_estimate_usd",
        "tools_used_count",
        "tools_used_list",
        "most_used_tool",
        "llm_model_used",
        "efficiency_score",
    ];

    /// Decodes one warehouse row (a JSON object keyed by column name).
    pub fn from_row(index: usize, row: &Value) -> Result<Self, AnalyticsError> {
        serde_json::from_value(row.clone()).map_err(|err| AnalyticsError::RowDecode {
            index,
            reason: err.to_string(),
        })
    }

    /// Decodes a result set, skipping rows that do not match the schema.
    /// A skipped row is a warehouse-side anomaly worth a warning, not a
    /// reason to blank the whole dashboard.
    pub fn from_rows(rows: &[Value]) -> Vec<Self> {
        rows.iter()
            .enumerate()
            .filter_map(|(index, row)| match Self::from_row(index, row) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(error = %err, "Skipping undecodable execution record");
                    None
                }
            })
            .collect()
    }
}

/// Aggregates the dashboard header displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    pub total_runs: usize,
    pub success_rate: f64,
    pub total_tokens: i64,
    pub total_cost_usd: f64,
    pub avg_duration_ms: f64,
}

/// Computes the dashboard aggregates over a result set.
pub fn summarize(records: &[ExecutionRecord]) -> ExecutionSummary {
    let total_runs = records.len();
    if total_runs == 0 {
        return ExecutionSummary {
            total_runs: 0,
            success_rate: 0.0,
            total_tokens: 0,
            total_cost_usd: 0.0,
            avg_duration_ms: 0.0,
        };
    }

    let successes = records.iter().filter(|r| r.success).count();
    let total_tokens = records.iter().map(|r| r.total_tokens_used).sum();
    let total_cost_usd = records.iter().map(|r| r.cost_estimate_usd).sum();
    let total_duration: f64 = records.iter().map(|r| r.execution_duration_ms).sum();

    ExecutionSummary {
        total_runs,
        success_rate: successes as f64 / total_runs as f64,
        total_tokens,
        total_cost_usd,
        avg_duration_ms: total_duration / total_runs as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row() -> Value {
        json!({
            "agent_name": "researcher",
            "execution_timestamp": "2025-06-01T12:30:00Z",
            "execution_date": "2025-06-01",
            "execution_duration_ms": 5400.0,
            "success": true,
            "total_events": 12,
            "total_tool_calls": 4,
            "total_llm_calls": 3,
            "total_tokens_used": 1820,
            "prompt_tokens_used": 1200,
            "completion_tokens_used": 620,
            "tokens_per_second": 33.7,
            "cost_estimate_usd": 0.042,
            "tools_used_count": 2,
            "most_used_tool": "web_search",
            "llm_model_used": "gpt-4o"
        })
    }

    #[test]
    fn test_decode_row() {
        let record = ExecutionRecord::from_row(0, &sample_row()).unwrap();
        assert_eq!(record.agent_name, "researcher");
        assert!(record.success);
        assert_eq!(record.total_tokens_used, 1820);
        // Columns absent from the row fall back to defaults.
        assert_eq!(record.error_message, None);
        assert_eq!(record.efficiency_score, 0.0);
    }

    #[test]
    fn test_bad_rows_are_skipped_not_fatal() {
        let rows = vec![sample_row(), json!({"success": "not-a-record"})];
        let records = ExecutionRecord::from_rows(&rows);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_summarize() {
        let mut ok = ExecutionRecord::from_row(0, &sample_row()).unwrap();
        let mut failed = ok.clone();
        failed.success = false;
        failed.execution_duration_ms = 600.0;
        ok.execution_duration_ms = 400.0;

        let summary = summarize(&[ok, failed]);
        assert_eq!(summary.total_runs, 2);
        assert!((summary.success_rate - 0.5).abs() < 1e-12);
        assert_eq!(summary.total_tokens, 3640);
        assert!((summary.avg_duration_ms - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_runs, 0);
        assert_eq!(summary.success_rate, 0.0);
    }
}
