use serde::{Deserialize, Serialize};

use crate::database::row::lenient;
use crate::unflatten::{AggregatedRow, SubRecord};

/// A student's classes in one semester, as `|`-joined class ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentClass {
    #[serde(deserialize_with = "lenient::string")]
    pub id_pd: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nik: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id_kelas: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub semester: String,
}

/// One student per row with every class column `|`-joined in class order.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentClassRow {
    #[serde(deserialize_with = "lenient::string")]
    pub id_pd: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nik: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub semester: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id_kelas: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nama_kelas: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nama_matakuliah: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub kode_matakuliah: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id_dosen_pengajar: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub jadwal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSession {
    pub id_kelas: String,
    pub nama_kelas: String,
    pub nama_matakuliah: String,
    pub kode_matakuliah: String,
    pub id_dosen_pengajar: String,
    pub jadwal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentClassDetail {
    pub id_pd: String,
    pub nik: String,
    pub semester: String,
    pub kelas_perkuliahan: Vec<ClassSession>,
}

impl AggregatedRow for StudentClassRow {
    type Item = ClassSession;
    type Output = StudentClassDetail;

    const ANCHOR: &'static str = "id_kelas";

    fn anchor(&self) -> &str {
        &self.id_kelas
    }

    fn siblings(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("nama_kelas", self.nama_kelas.as_str()),
            ("nama_matakuliah", self.nama_matakuliah.as_str()),
            ("kode_matakuliah", self.kode_matakuliah.as_str()),
            ("id_dosen_pengajar", self.id_dosen_pengajar.as_str()),
            ("jadwal", self.jadwal.as_str()),
        ]
    }

    fn item(sub: SubRecord) -> ClassSession {
        ClassSession {
            nama_kelas: sub.field(0).to_string(),
            nama_matakuliah: sub.field(1).to_string(),
            kode_matakuliah: sub.field(2).to_string(),
            id_dosen_pengajar: sub.field(3).to_string(),
            jadwal: sub.field(4).to_string(),
            id_kelas: sub.key,
        }
    }

    fn assemble(self, items: Vec<ClassSession>) -> StudentClassDetail {
        StudentClassDetail {
            id_pd: self.id_pd,
            nik: self.nik,
            semester: self.semester,
            kelas_perkuliahan: items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unflatten::{UnflattenError, Unflattener};

    fn row(jadwal: &str, dosen: &str) -> StudentClassRow {
        StudentClassRow {
            id_pd: "pd-1".into(),
            nik: "3201000000000001".into(),
            semester: "20241".into(),
            id_kelas: "10|11|12".into(),
            nama_kelas: "A|B|C".into(),
            nama_matakuliah: "Kalkulus|Fisika|Kimia".into(),
            kode_matakuliah: "MK1|MK2|MK3".into(),
            id_dosen_pengajar: dosen.into(),
            jadwal: jadwal.into(),
        }
    }

    #[test]
    fn builds_class_roster() {
        let detail = Unflattener::tolerant().unflatten(row("Senin-08:00-10:00|Selasa-08:00-10:00|Rabu-08:00-10:00", "D1|D2|D3")).unwrap();
        assert_eq!(detail.id_pd, "pd-1");
        assert_eq!(detail.kelas_perkuliahan.len(), 3);
        assert_eq!(
            detail.kelas_perkuliahan[1],
            ClassSession {
                id_kelas: "11".into(),
                nama_kelas: "B".into(),
                nama_matakuliah: "Fisika".into(),
                kode_matakuliah: "MK2".into(),
                id_dosen_pengajar: "D2".into(),
                jadwal: "Selasa-08:00-10:00".into(),
            }
        );
    }

    #[test]
    fn unscheduled_classes_have_empty_jadwal() {
        let detail = Unflattener::tolerant().unflatten(row("", "D1|D2")).unwrap();
        assert!(detail.kelas_perkuliahan.iter().all(|c| c.jadwal.is_empty()));
        assert_eq!(detail.kelas_perkuliahan[2].id_dosen_pengajar, "");
    }

    #[test]
    fn strict_names_the_short_column() {
        let err = Unflattener::strict().unflatten(row("S|S|S", "D1|D2")).unwrap_err();
        assert_eq!(
            err,
            UnflattenError::DataMismatch {
                anchor: "id_kelas".into(),
                column: "id_dosen_pengajar".into(),
                expected: 3,
                actual: 2,
            }
        );
    }
}
