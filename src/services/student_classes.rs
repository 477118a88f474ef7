use crate::database::models::{StudentClass, StudentClassDetail, StudentClassRow};
use crate::database::{decode_rows, QueryExecutor, SelectQuery};
use crate::filter::{ListFilter, ListSpec};
use crate::types::InstanceMode;
use crate::unflatten::Unflattener;

use super::semesters::SemesterService;
use super::{fetch_page, fetch_total, Page, ServiceError};

const LIST: ListSpec = ListSpec {
    keyword_columns: &["mahasiswa.nik"],
    sort_columns: &[
        ("id_pd", "nilai.id_pd"),
        ("nik", "mahasiswa.nik"),
        ("semester", "nilai.smt_ambil"),
    ],
    default_order: "nilai.id_pd ASC",
};

const GROUPING: &[&str] = &["nilai.id_pd", "mahasiswa.nik", "nilai.smt_ambil"];

/// Day number 0 (Sunday) to 6 (Saturday), rendered as `Hari-mulai-selesai`.
const SCHEDULE: &str = "GROUP_CONCAT(CONCAT(CASE jadwal.hari \
    WHEN '0' THEN 'Minggu' WHEN '1' THEN 'Senin' WHEN '2' THEN 'Selasa' WHEN '3' THEN 'Rabu' \
    WHEN '4' THEN 'Kamis' WHEN '5' THEN 'Jumat' WHEN '6' THEN 'Sabtu' ELSE 'Unknown' END, \
    '-', jadwal.jam_mulai, '-', jadwal.jam_selesai) \
    ORDER BY jadwal.id_jadwal SEPARATOR '|') AS jadwal";

/// Students enrolled in a semester's classes, one row per student.
pub struct StudentClassService<'a> {
    executor: &'a dyn QueryExecutor,
    mode: InstanceMode,
    unflattener: Unflattener,
}

impl<'a> StudentClassService<'a> {
    pub fn new(executor: &'a dyn QueryExecutor, mode: InstanceMode, unflattener: Unflattener) -> Self {
        Self { executor, mode, unflattener }
    }

    /// Class ids stay `|`-joined.
    pub async fn list(&self, filter: &ListFilter, semester: Option<&str>) -> Result<Page<StudentClass>, ServiceError> {
        let semester = self.semester(semester).await?;
        let query = Self::simple(&semester).apply_filter(filter, &LIST)?;
        let (rows, page_info) = fetch_page(self.executor, query, filter).await?;
        Ok(Page { items: decode_rows(rows)?, page_info })
    }

    pub async fn total(&self, semester: Option<&str>) -> Result<i64, ServiceError> {
        let semester = self.semester(semester).await?;
        fetch_total(self.executor, &Self::simple(&semester)).await
    }

    /// Each student's classes unflattened into `kelas_perkuliahan`.
    pub async fn list_details(
        &self,
        filter: &ListFilter,
        semester: Option<&str>,
    ) -> Result<Page<StudentClassDetail>, ServiceError> {
        let semester = self.semester(semester).await?;
        let query = Self::detailed(&semester).apply_filter(filter, &LIST)?;
        let (rows, page_info) = fetch_page(self.executor, query, filter).await?;
        let rows: Vec<StudentClassRow> = decode_rows(rows)?;
        let items = self.unflattener.unflatten_all(rows).map_err(|e| {
            tracing::error!(mode = %self.unflattener.mode(), "Failed to unflatten student classes: {}", e);
            e
        })?;
        Ok(Page { items, page_info })
    }

    pub async fn total_details(&self, semester: Option<&str>) -> Result<i64, ServiceError> {
        let semester = self.semester(semester).await?;
        fetch_total(self.executor, &Self::detailed(&semester)).await
    }

    async fn semester(&self, requested: Option<&str>) -> Result<String, ServiceError> {
        SemesterService::new(self.executor, self.mode).resolve(requested).await
    }

    fn enrolled() -> SelectQuery {
        SelectQuery::from("nilai")
            .join("JOIN mahasiswa_histori ON mahasiswa_histori.id_pd = nilai.id_pd")
            .join("JOIN mahasiswa ON mahasiswa.id = mahasiswa_histori.id_mahasiswa")
            .join("JOIN kelaskuliah ON kelaskuliah.id_kls = nilai.id_kls")
    }

    fn simple(semester: &str) -> SelectQuery {
        Self::enrolled()
            .select(&[
                "nilai.id_pd AS id_pd",
                "mahasiswa.nik AS nik",
                "GROUP_CONCAT(kelaskuliah.id_kls ORDER BY kelaskuliah.id_kls SEPARATOR '|') AS id_kelas",
                "nilai.smt_ambil AS semester",
            ])
            .where_param("nilai.smt_ambil = ?", semester)
            .group_by(GROUPING)
    }

    fn detailed(semester: &str) -> SelectQuery {
        Self::enrolled()
            .select(&[
                "nilai.id_pd AS id_pd",
                "mahasiswa.nik AS nik",
                "GROUP_CONCAT(kelaskuliah.id_kls ORDER BY kelaskuliah.id_kls SEPARATOR '|') AS id_kelas",
                "GROUP_CONCAT(kelaskuliah.nm_kls ORDER BY kelaskuliah.id_kls SEPARATOR '|') AS nama_kelas",
                "GROUP_CONCAT(matakuliah.nm_mk ORDER BY kelaskuliah.id_kls SEPARATOR '|') AS nama_matakuliah",
                "GROUP_CONCAT(matakuliah.kode_mk ORDER BY kelaskuliah.id_kls SEPARATOR '|') AS kode_matakuliah",
                "GROUP_CONCAT(akt_mengajar_dosen.id_ptk ORDER BY akt_mengajar_dosen.id_ptk SEPARATOR '|') AS id_dosen_pengajar",
                SCHEDULE,
                "nilai.smt_ambil AS semester",
            ])
            .join("JOIN matakuliah_kurikulum ON matakuliah_kurikulum.id_mk_kur = kelaskuliah.id_mk_kur")
            .join("JOIN matakuliah ON matakuliah.id_mk = matakuliah_kurikulum.id_mk")
            .join("LEFT JOIN akt_mengajar_dosen ON akt_mengajar_dosen.id_kls = kelaskuliah.id_kls")
            .join("LEFT JOIN jadwal ON jadwal.id_kls = kelaskuliah.id_kls")
            .where_param("nilai.smt_ambil = ?", semester)
            .group_by(GROUPING)
    }
}
