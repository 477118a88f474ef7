use crate::database::models::Class;
use crate::database::{decode_rows, QueryExecutor, SelectQuery};
use crate::filter::{ListFilter, ListSpec};
use crate::types::InstanceMode;

use super::semesters::SemesterService;
use super::{fetch_page, fetch_total, Page, ServiceError};

const LIST: ListSpec = ListSpec {
    keyword_columns: &["kelaskuliah.nm_kls"],
    sort_columns: &[
        ("id_kelas", "kelaskuliah.id_kls"),
        ("nama_kelas", "kelaskuliah.nm_kls"),
        ("nama_matakuliah", "matakuliah.nm_mk"),
        ("kode_matakuliah", "matakuliah.kode_mk"),
    ],
    default_order: "kelaskuliah.id_kls ASC",
};

/// Day number 1 (Monday) to 7 (Sunday), rendered as `Hari-mulai-selesai`.
const SCHEDULE: &str = "GROUP_CONCAT(CONCAT(CASE jadwal.hari \
    WHEN '1' THEN 'Senin' WHEN '2' THEN 'Selasa' WHEN '3' THEN 'Rabu' WHEN '4' THEN 'Kamis' \
    WHEN '5' THEN 'Jumat' WHEN '6' THEN 'Sabtu' WHEN '7' THEN 'Minggu' ELSE 'Unknown' END, \
    '-', jadwal.jam_mulai, '-', jadwal.jam_selesai) \
    ORDER BY jadwal.hari, jadwal.jam_mulai ASC SEPARATOR '|') AS jadwal";

const ROOMS: &str = "GROUP_CONCAT(ruangan.nama_ruangan ORDER BY ruangan.nama_ruangan ASC SEPARATOR '|') AS nama_ruangan";

const MEETINGS: &str =
    "GROUP_CONCAT(akt_mengajar_dosen.temu_rencana ORDER BY akt_mengajar_dosen.temu_rencana ASC SEPARATOR '|') AS total_pertemuan";

/// Classes of a semester with their schedules, rooms and planned meetings.
pub struct ClassService<'a> {
    executor: &'a dyn QueryExecutor,
    mode: InstanceMode,
}

impl<'a> ClassService<'a> {
    pub fn new(executor: &'a dyn QueryExecutor, mode: InstanceMode) -> Self {
        Self { executor, mode }
    }

    pub async fn list(&self, filter: &ListFilter, semester: Option<&str>) -> Result<Page<Class>, ServiceError> {
        let semester = SemesterService::new(self.executor, self.mode).resolve(semester).await?;
        let query = Self::base(&semester).apply_filter(filter, &LIST)?;
        let (rows, page_info) = fetch_page(self.executor, query, filter).await?;
        Ok(Page { items: decode_rows(rows)?, page_info })
    }

    pub async fn total(&self, semester: Option<&str>) -> Result<i64, ServiceError> {
        let semester = SemesterService::new(self.executor, self.mode).resolve(semester).await?;
        let query = SelectQuery::from("kelaskuliah").where_param("kelaskuliah.id_smt = ?", semester);
        fetch_total(self.executor, &query).await
    }

    fn base(semester: &str) -> SelectQuery {
        SelectQuery::from("kelaskuliah")
            .select(&[
                "kelaskuliah.id_kls AS id_kelas",
                "kelaskuliah.nm_kls AS nama_kelas",
                "matakuliah.nm_mk AS nama_matakuliah",
                "matakuliah.kode_mk AS kode_matakuliah",
                "akt_mengajar_dosen.id_ptk AS id_dosen_pengajar",
                "kelaskuliah.id_smt AS semester",
                SCHEDULE,
                ROOMS,
                MEETINGS,
            ])
            .join("JOIN matakuliah_kurikulum ON matakuliah_kurikulum.id_mk_kur = kelaskuliah.id_mk_kur")
            .join("JOIN matakuliah ON matakuliah.id_mk = matakuliah_kurikulum.id_mk")
            .join("LEFT JOIN akt_mengajar_dosen ON akt_mengajar_dosen.id_kls = kelaskuliah.id_kls")
            .join("LEFT JOIN jadwal ON jadwal.id_kls = kelaskuliah.id_kls")
            .join("LEFT JOIN ruangan ON ruangan.id_ruangan = jadwal.id_ruangan")
            .where_param("kelaskuliah.id_smt = ?", semester)
            .group_by(&["kelaskuliah.id_kls"])
    }
}
