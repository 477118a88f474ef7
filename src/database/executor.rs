use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use sqlx::mysql::{MySql, MySqlArguments, MySqlPool};
use sqlx::query::Query;

use crate::config::DatabaseConfig;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::row::{row_to_json, JsonRow};
use crate::filter::SqlResult;

/// Runs built SQL and hands rows back as JSON maps.
///
/// Services only see this trait, so they can run against an in-memory
/// executor in tests.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn fetch_all(&self, sql: &SqlResult) -> Result<Vec<JsonRow>, DatabaseError>;

    async fn fetch_optional(&self, sql: &SqlResult) -> Result<Option<JsonRow>, DatabaseError> {
        Ok(self.fetch_all(sql).await?.into_iter().next())
    }

    /// Reads the `count` column of the first row; no row counts as 0.
    async fn fetch_count(&self, sql: &SqlResult) -> Result<i64, DatabaseError> {
        let row = self.fetch_optional(sql).await?;
        Ok(row.as_ref().and_then(|r| r.get("count")).and_then(count_value).unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), DatabaseError>;
}

fn count_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_u64().map(|u| u.min(i64::MAX as u64) as i64)),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub struct MySqlExecutor {
    pool: MySqlPool,
    slow_query_threshold: Option<Duration>,
}

impl MySqlExecutor {
    pub fn new(pool: MySqlPool, config: &DatabaseConfig) -> Self {
        let slow_query_threshold = config
            .enable_slow_query_warning
            .then(|| Duration::from_millis(config.slow_query_threshold_ms));
        Self { pool, slow_query_threshold }
    }

    fn build<'q>(sql: &'q SqlResult) -> Query<'q, MySql, MySqlArguments> {
        let mut q = sqlx::query(&sql.query);
        for p in sql.params.iter() {
            q = bind_param(q, p);
        }
        q
    }

    fn observe(&self, sql: &SqlResult, started: Instant) {
        let elapsed = started.elapsed();
        if let Some(threshold) = self.slow_query_threshold {
            if elapsed >= threshold {
                tracing::warn!(elapsed_ms = elapsed.as_millis() as u64, "Slow query: {}", sql.query);
                return;
            }
        }
        tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "Query: {}", sql.query);
    }
}

#[async_trait]
impl QueryExecutor for MySqlExecutor {
    async fn fetch_all(&self, sql: &SqlResult) -> Result<Vec<JsonRow>, DatabaseError> {
        let started = Instant::now();
        let rows = Self::build(sql).fetch_all(&self.pool).await?;
        self.observe(sql, started);
        rows.iter().map(row_to_json).collect()
    }

    async fn fetch_optional(&self, sql: &SqlResult) -> Result<Option<JsonRow>, DatabaseError> {
        let started = Instant::now();
        let row = Self::build(sql).fetch_optional(&self.pool).await?;
        self.observe(sql, started);
        row.as_ref().map(row_to_json).transpose()
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

fn bind_param<'q>(q: Query<'q, MySql, MySqlArguments>, v: &'q Value) -> Query<'q, MySql, MySqlArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                q.bind(u)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        // Compared as JSON text
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct OneRow(Value);

    #[async_trait]
    impl QueryExecutor for OneRow {
        async fn fetch_all(&self, _sql: &SqlResult) -> Result<Vec<JsonRow>, DatabaseError> {
            Ok(self.0.as_object().cloned().into_iter().collect())
        }

        async fn ping(&self) -> Result<(), DatabaseError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn count_reads_count_column() {
        let sql = SqlResult::new("SELECT COUNT(*) AS count FROM t");
        assert_eq!(OneRow(json!({"count": 42})).fetch_count(&sql).await.unwrap(), 42);
        assert_eq!(OneRow(json!({"count": "7"})).fetch_count(&sql).await.unwrap(), 7);
        assert_eq!(OneRow(json!(null)).fetch_count(&sql).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn optional_takes_first_row() {
        let sql = SqlResult::new("SELECT 1");
        let row = OneRow(json!({"id": 1})).fetch_optional(&sql).await.unwrap().unwrap();
        assert_eq!(row.get("id"), Some(&json!(1)));
        assert!(OneRow(json!(null)).fetch_optional(&sql).await.unwrap().is_none());
    }
}
