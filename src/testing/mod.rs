//! In-memory `QueryExecutor` for exercising services and routes without MySQL.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::database::{DatabaseError, JsonRow, QueryExecutor};
use crate::filter::SqlResult;

const COUNT_PREFIX: &str = "SELECT COUNT(*) AS count";

enum Outcome {
    Rows(Vec<JsonRow>),
    Fail(String),
}

struct Rule {
    count: bool,
    needles: Vec<String>,
    outcome: Outcome,
}

impl Rule {
    fn matches(&self, sql: &SqlResult) -> bool {
        self.count == sql.query.starts_with(COUNT_PREFIX) && self.needles.iter().all(|n| sql.query.contains(n.as_str()))
    }
}

/// Answers queries from canned rows, matched by substrings of the SQL.
///
/// Row rules never answer count queries and count rules only answer count
/// queries. The first matching rule wins; unmatched queries return no rows.
#[derive(Default)]
pub struct FixtureExecutor {
    rules: Vec<Rule>,
    unavailable: bool,
    executed: Mutex<Vec<SqlResult>>,
}

impl FixtureExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows for non-count queries containing every needle. Non-object
    /// values are ignored.
    pub fn on(mut self, needles: &[&str], rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.rules.push(Rule {
            count: false,
            needles: needles.iter().map(|n| n.to_string()).collect(),
            outcome: Outcome::Rows(rows),
        });
        self
    }

    pub fn on_count(mut self, needles: &[&str], count: i64) -> Self {
        let mut row = JsonRow::new();
        row.insert("count".to_string(), json!(count));
        self.rules.push(Rule {
            count: true,
            needles: needles.iter().map(|n| n.to_string()).collect(),
            outcome: Outcome::Rows(vec![row]),
        });
        self
    }

    /// Fails matching non-count queries with a query error.
    pub fn fail(mut self, needles: &[&str], message: &str) -> Self {
        self.rules.push(Rule {
            count: false,
            needles: needles.iter().map(|n| n.to_string()).collect(),
            outcome: Outcome::Fail(message.to_string()),
        });
        self
    }

    /// Every query and ping fails as if the pool could not connect.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn executed(&self) -> Vec<SqlResult> {
        self.executed.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl QueryExecutor for FixtureExecutor {
    async fn fetch_all(&self, sql: &SqlResult) -> Result<Vec<JsonRow>, DatabaseError> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(sql.clone());
        }
        if self.unavailable {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        match self.rules.iter().find(|rule| rule.matches(sql)).map(|rule| &rule.outcome) {
            Some(Outcome::Rows(rows)) => Ok(rows.clone()),
            Some(Outcome::Fail(message)) => Err(DatabaseError::Sqlx(sqlx::Error::Protocol(message.clone()))),
            None => Ok(vec![]),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        if self.unavailable {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}
