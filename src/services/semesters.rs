use crate::database::models::{ActiveSemester, Semester};
use crate::database::{decode_row, decode_rows, QueryExecutor, SelectQuery};
use crate::types::InstanceMode;

use super::ServiceError;

/// `setting.param` whose value is the semester in effect (misca).
const ACTIVE_PERIOD_PARAM: &str = "periode_berlaku";

pub struct SemesterService<'a> {
    executor: &'a dyn QueryExecutor,
    mode: InstanceMode,
}

impl<'a> SemesterService<'a> {
    pub fn new(executor: &'a dyn QueryExecutor, mode: InstanceMode) -> Self {
        Self { executor, mode }
    }

    /// Every semester with its `active` flag. Not paginated.
    pub async fn list(&self) -> Result<Vec<Semester>, ServiceError> {
        let query = match self.mode {
            InstanceMode::Misca => SelectQuery::from("semester")
                .select(&[
                    "semester.id_smt AS id",
                    "semester.nm_smt AS name",
                    "CASE WHEN setting.param = 'periode_berlaku' THEN 1 ELSE 0 END AS active",
                ])
                .join("LEFT JOIN setting ON semester.id_smt = setting.value AND setting.param = 'periode_berlaku'")
                .order_by("semester.id_smt ASC"),
            InstanceMode::Smart => SelectQuery::from("semester")
                .select(&["id_smt AS id", "nm_smt AS name", "a_periode_aktif AS active"])
                .order_by("id_smt ASC"),
        };
        let rows = self.executor.fetch_all(&query.to_sql()).await?;
        Ok(decode_rows(rows)?)
    }

    pub async fn active(&self) -> Result<ActiveSemester, ServiceError> {
        let query = match self.mode {
            InstanceMode::Misca => SelectQuery::from("semester")
                .select(&["semester.id_smt AS id", "semester.nm_smt AS name"])
                .join("JOIN setting ON semester.id_smt = setting.value")
                .where_param("setting.param = ?", ACTIVE_PERIOD_PARAM),
            InstanceMode::Smart => SelectQuery::from("semester")
                .select(&["id_smt AS id", "nm_smt AS name"])
                .where_raw("a_periode_aktif = 1"),
        }
        .limit(1);

        match self.executor.fetch_optional(&query.to_sql()).await? {
            Some(row) => Ok(decode_row(row)?),
            None => Err(ServiceError::ActiveSemesterNotFound),
        }
    }

    /// The requested semester when given, otherwise the active one.
    pub async fn resolve(&self, requested: Option<&str>) -> Result<String, ServiceError> {
        if let Some(semester) = requested.map(str::trim).filter(|s| !s.is_empty()) {
            return Ok(semester.to_string());
        }
        let query = match self.mode {
            InstanceMode::Misca => SelectQuery::from("setting")
                .select(&["value"])
                .where_param("param = ?", ACTIVE_PERIOD_PARAM),
            InstanceMode::Smart => SelectQuery::from("semester")
                .select(&["id_smt AS value"])
                .where_raw("a_periode_aktif = 1"),
        }
        .limit(1);

        let value = self
            .executor
            .fetch_optional(&query.to_sql())
            .await?
            .and_then(|row| row.get("value").cloned())
            .and_then(|v| match v {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty());

        match value {
            Some(semester) => {
                tracing::debug!(semester = %semester, "Defaulting to active semester");
                Ok(semester)
            }
            None => Err(ServiceError::ActiveSemesterNotFound),
        }
    }
}
