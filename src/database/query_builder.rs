use serde_json::Value;

use crate::filter::filter_order::FilterOrder;
use crate::filter::filter_where::FilterWhere;
use crate::filter::{FilterError, ListFilter, ListSpec, SqlResult};

/// Builder for the MySQL `SELECT` statements behind every endpoint.
///
/// Fragments are trusted SQL written by the services; only values travel as
/// `?` parameters. Conditions are joined with `AND` in the order they were
/// added, and parameters are emitted in that same order.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    table: String,
    columns: Vec<String>,
    joins: Vec<String>,
    conditions: Vec<String>,
    params: Vec<Value>,
    group_by: Vec<String>,
    order_by: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl SelectQuery {
    pub fn from(table: impl Into<String>) -> Self {
        Self { table: table.into(), ..Self::default() }
    }

    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns.extend(columns.iter().map(|c| c.trim().to_string()));
        self
    }

    /// Full join clause, e.g. `LEFT JOIN setting ON ...`.
    pub fn join(mut self, clause: impl Into<String>) -> Self {
        self.joins.push(clause.into());
        self
    }

    pub fn where_raw(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Condition with exactly one `?` placeholder.
    pub fn where_param(mut self, condition: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(condition.into());
        self.params.push(value.into());
        self
    }

    /// `(c1 LIKE ? OR c2 LIKE ?)` with `%keyword%`; no-op for an empty keyword.
    pub fn keyword(mut self, columns: &[&str], keyword: &str) -> Self {
        if let Some((condition, params)) = FilterWhere::keyword(columns, keyword) {
            self.conditions.push(condition);
            self.params.extend(params);
        }
        self
    }

    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.group_by.extend(columns.iter().map(|c| c.to_string()));
        self
    }

    pub fn order_by(mut self, expression: impl Into<String>) -> Self {
        self.order_by = Some(expression.into());
        self
    }

    /// Applies the keyword predicate and the resolved sort of a list request.
    pub fn apply_filter(self, filter: &ListFilter, spec: &ListSpec) -> Result<Self, FilterError> {
        let order = FilterOrder::resolve(filter, spec)?;
        let order_sql = FilterOrder::generate(order.as_ref(), spec);
        Ok(self.keyword(spec.keyword_columns, &filter.keyword).order_by(order_sql))
    }

    pub fn paginate(mut self, filter: &ListFilter) -> Self {
        self.limit = Some(filter.limit());
        self.offset = Some(filter.offset());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_sql(&self) -> SqlResult {
        let columns = if self.columns.is_empty() { "*".to_string() } else { self.columns.join(", ") };
        let mut query = format!("SELECT {} FROM {}", columns, self.table);
        self.push_body(&mut query);

        if let Some(order) = &self.order_by {
            query.push_str(" ORDER BY ");
            query.push_str(order);
        }

        let mut params = self.params.clone();
        if let Some(limit) = self.limit {
            query.push_str(" LIMIT ?");
            params.push(Value::from(limit));
            if let Some(offset) = self.offset {
                query.push_str(" OFFSET ?");
                params.push(Value::from(offset));
            }
        }

        SqlResult { query, params }
    }

    /// Counts the rows `to_sql` would return without paging. Grouped queries
    /// are counted through a sub-select so each group counts once.
    pub fn to_count_sql(&self) -> SqlResult {
        let query = if self.group_by.is_empty() {
            let mut query = format!("SELECT COUNT(*) AS count FROM {}", self.table);
            self.push_body(&mut query);
            query
        } else {
            let mut inner = format!("SELECT 1 FROM {}", self.table);
            self.push_body(&mut inner);
            format!("SELECT COUNT(*) AS count FROM ({}) AS grouped", inner)
        };
        SqlResult { query, params: self.params.clone() }
    }

    fn push_body(&self, query: &mut String) {
        for join in &self.joins {
            query.push(' ');
            query.push_str(join);
        }
        if !self.conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.conditions.join(" AND "));
        }
        if !self.group_by.is_empty() {
            query.push_str(" GROUP BY ");
            query.push_str(&self.group_by.join(", "));
        }
    }
}
