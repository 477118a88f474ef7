use crate::database::{JsonRow, QueryExecutor, SelectQuery};
use crate::types::InstanceMode;

use super::{fetch_total, ServiceError};

/// Study programs (`sms`) joined with their education level.
///
/// Misca exposes every `sms` column, so rows are returned as-is rather
/// than through a fixed model.
pub struct StudyProgramService<'a> {
    executor: &'a dyn QueryExecutor,
    mode: InstanceMode,
}

impl<'a> StudyProgramService<'a> {
    pub fn new(executor: &'a dyn QueryExecutor, mode: InstanceMode) -> Self {
        Self { executor, mode }
    }

    pub async fn list(&self) -> Result<Vec<JsonRow>, ServiceError> {
        let query = match self.mode {
            InstanceMode::Misca => SelectQuery::from("sms")
                .select(&["sms.*", "jenjang_pendidikan.nama_jenjang_didik AS nama_jenjang_didik"])
                .join("LEFT JOIN jenjang_pendidikan ON sms.id_jenj_didik = jenjang_pendidikan.id_jenjang_didik"),
            InstanceMode::Smart => SelectQuery::from("sms")
                .select(&[
                    "sms.id_sms AS id_sms",
                    "sms.nm_lemb AS nm_lemb",
                    "sms.nm_lemb_english AS nm_lemb_inggris",
                    "sms.kode_prodi AS kode_sms",
                    "sms.id_jns_sms",
                    "jenjang_pendidikan.nm_jenj_didik AS nama_jenjang_didik",
                ])
                .join("LEFT JOIN jenjang_pendidikan ON sms.id_jenj_didik = jenjang_pendidikan.id_jenj_didik"),
        };
        Ok(self.executor.fetch_all(&query.to_sql()).await?)
    }

    pub async fn total(&self) -> Result<i64, ServiceError> {
        fetch_total(self.executor, &SelectQuery::from("sms")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixtureExecutor;
    use serde_json::json;

    #[tokio::test]
    async fn rows_pass_through_untouched() {
        let executor = FixtureExecutor::new().on(
            &["FROM sms"],
            vec![json!({"id_sms": "86205", "nm_lemb": "Teknik Informatika", "nama_jenjang_didik": "S1", "extra": 7})],
        );
        let programs = StudyProgramService::new(&executor, InstanceMode::Misca).list().await.unwrap();
        assert_eq!(programs[0]["nm_lemb"], json!("Teknik Informatika"));
        assert_eq!(programs[0]["extra"], json!(7));
        assert!(executor.executed()[0].query.contains("jenjang_pendidikan.id_jenjang_didik"));
    }

    #[tokio::test]
    async fn smart_selects_renamed_columns() {
        let executor = FixtureExecutor::new();
        StudyProgramService::new(&executor, InstanceMode::Smart).list().await.unwrap();
        let query = &executor.executed()[0].query;
        assert!(query.contains("sms.kode_prodi AS kode_sms"));
        assert!(query.contains("jenjang_pendidikan.id_jenj_didik"));
    }
}
