use serde::{Deserialize, Serialize};

use crate::database::row::lenient;

/// A class offered in a semester. Schedule, room and meeting columns are
/// `|`-joined across the class's schedule rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    #[serde(deserialize_with = "lenient::string")]
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
    pub semester: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub jadwal: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nama_ruangan: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub total_pertemuan: String,
}
