use crate::database::models::{Room, RoomRow};
use crate::database::{decode_rows, QueryExecutor, SelectQuery};
use crate::types::InstanceMode;

use super::{fetch_total, ServiceError};

pub struct RoomService<'a> {
    executor: &'a dyn QueryExecutor,
    mode: InstanceMode,
}

impl<'a> RoomService<'a> {
    pub fn new(executor: &'a dyn QueryExecutor, mode: InstanceMode) -> Self {
        Self { executor, mode }
    }

    /// Every room with `id_sms` decoded into a list. Not paginated.
    pub async fn list(&self) -> Result<Vec<Room>, ServiceError> {
        let query = match self.mode {
            InstanceMode::Misca => SelectQuery::from("ruangan").select(&[
                "id_ruangan",
                "id_sms",
                "nama_ruangan",
                "id_jenis_ruangan",
                "kode_ruangan",
                "keterangan",
                "kapasitas",
                "created_at",
                "updated_at",
            ]),
            InstanceMode::Smart => SelectQuery::from("ruangan").select(&[
                "id_ruangan",
                "id_sms",
                "kode_ruangan",
                "kode_ruangan AS nama_ruangan",
                "ket AS keterangan",
            ]),
        };
        let rows: Vec<RoomRow> = decode_rows(self.executor.fetch_all(&query.to_sql()).await?)?;
        Ok(rows.into_iter().map(|row| row.into_room(self.mode)).collect())
    }

    pub async fn total(&self) -> Result<i64, ServiceError> {
        fetch_total(self.executor, &SelectQuery::from("ruangan")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixtureExecutor;
    use serde_json::json;

    #[tokio::test]
    async fn misca_rooms_decode_program_list() {
        let executor = FixtureExecutor::new().on(
            &["FROM ruangan"],
            vec![json!({
                "id_ruangan": 1, "id_sms": "[\"86205\",\"86206\"]", "nama_ruangan": "Lab 1",
                "id_jenis_ruangan": null, "kode_ruangan": "L1", "keterangan": null, "kapasitas": 40,
                "created_at": "2024-01-01 08:00:00", "updated_at": null
            })],
        );
        let rooms = RoomService::new(&executor, InstanceMode::Misca).list().await.unwrap();
        assert_eq!(rooms[0].id_ruangan, "1");
        assert_eq!(rooms[0].id_sms, vec!["86205", "86206"]);
        assert_eq!(rooms[0].kapasitas, Some(40));
        assert_eq!(rooms[0].keterangan, "");
    }

    #[tokio::test]
    async fn smart_rooms_reuse_code_as_name() {
        let executor = FixtureExecutor::new().on(
            &["FROM ruangan"],
            vec![json!({"id_ruangan": "r-1", "id_sms": "86205", "kode_ruangan": "A-101", "nama_ruangan": "A-101", "keterangan": "Gedung A"})],
        );
        let rooms = RoomService::new(&executor, InstanceMode::Smart).list().await.unwrap();
        assert_eq!(rooms[0].nama_ruangan, "A-101");
        assert_eq!(rooms[0].id_sms, vec!["86205"]);
        assert_eq!(rooms[0].kapasitas, None);
        assert!(executor.executed()[0].query.contains("ket AS keterangan"));
    }

    #[tokio::test]
    async fn total_counts_all_rooms() {
        let executor = FixtureExecutor::new().on_count(&["FROM ruangan"], 42);
        assert_eq!(RoomService::new(&executor, InstanceMode::Misca).total().await.unwrap(), 42);
        assert_eq!(executor.executed()[0].query, "SELECT COUNT(*) AS count FROM ruangan");
    }
}
