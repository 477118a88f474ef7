use crate::database::models::ApiKey;
use crate::database::{decode_row, QueryExecutor, SelectQuery};

use super::ServiceError;

pub struct ApiKeyService<'a> {
    executor: &'a dyn QueryExecutor,
}

impl<'a> ApiKeyService<'a> {
    pub fn new(executor: &'a dyn QueryExecutor) -> Self {
        Self { executor }
    }

    /// Looks a key up by its exact value, active or not.
    pub async fn find(&self, key: &str) -> Result<Option<ApiKey>, ServiceError> {
        let query = SelectQuery::from("api_key_list")
            .select(&["id", "name", "active"])
            .where_param("api_key = ?", key)
            .limit(1);
        match self.executor.fetch_optional(&query.to_sql()).await? {
            Some(row) => Ok(Some(decode_row(row)?)),
            None => Ok(None),
        }
    }
}
