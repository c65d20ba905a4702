//! Fixed-column statement assembly for the executions table.
//!
//! The warehouse exposes one `agent_executions` table; every query is a
//! projection of `ExecutionRecord::COLUMNS` with optional agent/date
//! filters, newest first, bounded by a parameterized LIMIT. Values travel
//! as parameters, never spliced into the SQL text.

use crate::record::ExecutionRecord;

/// The table holding execution telemetry.
const EXECUTIONS_TABLE: &str = "agent_executions";

/// Default row cap when the caller does not choose one.
const DEFAULT_LIMIT: i64 = 100;

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Str(String),
    Int(i64),
}

/// A ready-to-execute parameterized statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

/// Builder for execution-record queries.
#[derive(Debug, Clone, Default)]
pub struct ExecutionQuery {
    agent_name: Option<String>,
    execution_date: Option<String>,
    limit: Option<i64>,
}

impl ExecutionQuery {
    /// All executions, newest first.
    pub fn all() -> Self {
        Self::default()
    }

    /// Executions of one agent.
    pub fn for_agent(name: impl Into<String>) -> Self {
        Self {
            agent_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Restricts to a single execution date (`YYYY-MM-DD`).
    pub fn on_date(mut self, date: impl Into<String>) -> Self {
        self.execution_date = Some(date.into());
        self
    }

    /// Caps the number of returned rows.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.max(1));
        self
    }

    /// Assembles the SELECT statement.
    pub fn statement(&self) -> Statement {
        let mut sql = format!(
            "SELECT {} FROM {}",
            ExecutionRecord::COLUMNS.join(", "),
            EXECUTIONS_TABLE
        );
        let mut params = Vec::new();

        let mut filters = Vec::new();
        if let Some(name) = &self.agent_name {
            filters.push("agent_name = ?");
            params.push(QueryParam::Str(name.clone()));
        }
        if let Some(date) = &self.execution_date {
            filters.push("execution_date = ?");
            params.push(QueryParam::Str(date.clone()));
        }
        if !filters.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&filters.join(" AND "));
        }

        sql.push_str(" ORDER BY execution_timestamp DESC LIMIT ?");
        params.push(QueryParam::Int(self.limit.unwrap_or(DEFAULT_LIMIT)));

        Statement { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_executions_statement() {
        let stmt = ExecutionQuery::all().limit(25).statement();
        assert!(stmt.sql.starts_with("SELECT agent_name, execution_timestamp"));
        assert!(stmt.sql.contains("FROM agent_executions"));
        assert!(stmt.sql.ends_with("ORDER BY execution_timestamp DESC LIMIT ?"));
        assert!(!stmt.sql.contains("WHERE"));
        assert_eq!(stmt.params, vec![QueryParam::Int(25)]);
    }

    #[test]
    fn test_projection_covers_fixed_schema() {
        let stmt = ExecutionQuery::all().statement();
        for column in ExecutionRecord::COLUMNS {
            assert!(stmt.sql.contains(column), "missing column {column}");
        }
    }

    #[test]
    fn test_agent_and_date_filters_are_parameterized() {
        let stmt = ExecutionQuery::for_agent("researcher")
            .on_date("2025-06-01")
            .statement();
        assert!(stmt
            .sql
            .contains("WHERE agent_name = ? AND execution_date = ?"));
        assert_eq!(
            stmt.params,
            vec![
                QueryParam::Str("researcher".into()),
                QueryParam::Str("2025-06-01".into()),
                QueryParam::Int(100),
            ]
        );
        // Values never appear in the statement text.
        assert!(!stmt.sql.contains("researcher"));
    }

    #[test]
    fn test_limit_floor_is_one() {
        let stmt = ExecutionQuery::all().limit(-5).statement();
        assert_eq!(stmt.params, vec![QueryParam::Int(1)]);
    }
}
