use crate::database::models::Student;
use crate::database::{decode_rows, QueryExecutor, SelectQuery};
use crate::filter::{ListFilter, ListSpec};
use crate::types::InstanceMode;

use super::{fetch_page, fetch_total, Page, ServiceError};

/// Only students with a 16 digit NIK are exposed.
pub(crate) const NIK_IS_VALID: &str = "nik IS NOT NULL AND nik != '' AND LENGTH(nik) = 16";

const MISCA_LIST: ListSpec = ListSpec {
    keyword_columns: &["nama_mahasiswa", "nik"],
    sort_columns: &[
        ("id", "id"),
        ("name", "nama_mahasiswa"),
        ("gender", "jenis_kelamin"),
        ("nik", "nik"),
        ("email", "email"),
        ("created_at", "created_at"),
    ],
    default_order: "created_at ASC",
};

const SMART_LIST: ListSpec = ListSpec {
    keyword_columns: &["nm_pd", "nik"],
    sort_columns: &[
        ("id", "id_pd"),
        ("name", "nm_pd"),
        ("gender", "jk"),
        ("nik", "nik"),
        ("email", "email"),
    ],
    default_order: "id_pd ASC",
};

pub struct StudentService<'a> {
    executor: &'a dyn QueryExecutor,
    mode: InstanceMode,
}

impl<'a> StudentService<'a> {
    pub fn new(executor: &'a dyn QueryExecutor, mode: InstanceMode) -> Self {
        Self { executor, mode }
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Page<Student>, ServiceError> {
        let query = self.base().apply_filter(filter, self.spec())?;
        let (rows, page_info) = fetch_page(self.executor, query, filter).await?;
        Ok(Page { items: decode_rows(rows)?, page_info })
    }

    pub async fn total(&self) -> Result<i64, ServiceError> {
        fetch_total(self.executor, &self.base()).await
    }

    fn spec(&self) -> &'static ListSpec {
        match self.mode {
            InstanceMode::Misca => &MISCA_LIST,
            InstanceMode::Smart => &SMART_LIST,
        }
    }

    fn base(&self) -> SelectQuery {
        match self.mode {
            InstanceMode::Misca => SelectQuery::from("mahasiswa")
                .select(&[
                    "id",
                    "nama_mahasiswa AS name",
                    "jenis_kelamin AS gender",
                    "nik",
                    "email",
                    "handphone",
                    "telepon AS telephone",
                ])
                .where_raw(NIK_IS_VALID)
                .where_raw("deleted_at IS NULL"),
            InstanceMode::Smart => SelectQuery::from("mahasiswa")
                .select(&[
                    "id_pd AS id",
                    "nm_pd AS name",
                    "jk AS gender",
                    "nik",
                    "email",
                    "telepon_seluler AS handphone",
                    "telepon_rumah AS telephone",
                ])
                .where_raw(NIK_IS_VALID),
        }
    }
}
