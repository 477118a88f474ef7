use crate::database::models::Lecturer;
use crate::database::{decode_rows, QueryExecutor, SelectQuery};
use crate::filter::{ListFilter, ListSpec};
use crate::types::InstanceMode;

use super::students::NIK_IS_VALID;
use super::{fetch_page, fetch_total, Page, ServiceError};

const LIST: ListSpec = ListSpec {
    keyword_columns: &["nama_dosen", "nik"],
    sort_columns: &[
        ("id", "id_ptk"),
        ("name", "nama_dosen"),
        ("gender", "jenis_kelamin"),
        ("nik", "nik"),
        ("email", "email"),
        ("created_at", "created_at"),
    ],
    default_order: "created_at ASC",
};

/// Lecturers live in `dosen` with the same columns in both modes.
pub struct LecturerService<'a> {
    executor: &'a dyn QueryExecutor,
    mode: InstanceMode,
}

impl<'a> LecturerService<'a> {
    pub fn new(executor: &'a dyn QueryExecutor, mode: InstanceMode) -> Self {
        Self { executor, mode }
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Page<Lecturer>, ServiceError> {
        tracing::debug!(mode = %self.mode, "Listing lecturers");
        let query = Self::base().apply_filter(filter, &LIST)?;
        let (rows, page_info) = fetch_page(self.executor, query, filter).await?;
        Ok(Page { items: decode_rows(rows)?, page_info })
    }

    /// Same NIK rule as the list, so the total matches an unfiltered listing.
    pub async fn total(&self) -> Result<i64, ServiceError> {
        fetch_total(self.executor, &Self::base()).await
    }

    fn base() -> SelectQuery {
        SelectQuery::from("dosen")
            .select(&[
                "id_ptk AS id",
                "nama_dosen AS name",
                "jenis_kelamin AS gender",
                "nik",
                "email",
                "handphone",
                "telepon AS telephone",
            ])
            .where_raw(NIK_IS_VALID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixtureExecutor;
    use serde_json::json;

    #[tokio::test]
    async fn maps_dosen_columns() {
        let executor = FixtureExecutor::new()
            .on_count(&["FROM dosen"], 1)
            .on(&["FROM dosen"], vec![json!({"id": "ptk-1", "name": "Dr. Sri", "gender": "P", "nik": "3201000000000002", "email": "sri@kampus.ac.id", "handphone": null, "telephone": null})]);
        let page = LecturerService::new(&executor, InstanceMode::Smart).list(&ListFilter::new()).await.unwrap();
        assert_eq!(page.items[0].id, "ptk-1");
        assert_eq!(page.items[0].name, "Dr. Sri");
        assert_eq!(page.page_info.total_data, 1);
        assert_eq!(page.page_info.last_page, 1);
    }

    #[tokio::test]
    async fn total_applies_nik_rule() {
        let executor = FixtureExecutor::new().on_count(&["FROM dosen"], 3);
        assert_eq!(LecturerService::new(&executor, InstanceMode::Misca).total().await.unwrap(), 3);
        let executed = executor.executed();
        assert_eq!(
            executed[0].query,
            "SELECT COUNT(*) AS count FROM dosen WHERE nik IS NOT NULL AND nik != '' AND LENGTH(nik) = 16"
        );
    }
}
