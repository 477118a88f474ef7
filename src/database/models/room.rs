use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::row::lenient;
use crate::types::InstanceMode;

/// `ruangan` row as stored; `id_sms` is whatever the column holds.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomRow {
    #[serde(deserialize_with = "lenient::string")]
    pub id_ruangan: String,
    #[serde(default)]
    pub id_sms: Value,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nama_ruangan: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id_jenis_ruangan: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub kode_ruangan: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub keterangan: String,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub kapasitas: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id_ruangan: String,
    pub id_sms: Vec<String>,
    pub nama_ruangan: String,
    pub id_jenis_ruangan: Option<String>,
    pub kode_ruangan: String,
    pub keterangan: String,
    pub kapasitas: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RoomRow {
    pub fn into_room(self, mode: InstanceMode) -> Room {
        Room {
            id_sms: decode_id_sms(&self.id_sms, mode.is_smart()),
            id_ruangan: self.id_ruangan,
            nama_ruangan: self.nama_ruangan,
            id_jenis_ruangan: self.id_jenis_ruangan,
            kode_ruangan: self.kode_ruangan,
            keterangan: self.keterangan,
            kapasitas: self.kapasitas,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Study program ids a room belongs to.
///
/// The column holds a JSON array (`["86205","86206"]`). Smart schemas may
/// also hold a single bare id, which is kept as a one-element list when
/// `accept_scalar` is set. Anything else yields an empty list.
pub fn decode_id_sms(raw: &Value, accept_scalar: bool) -> Vec<String> {
    match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => {
            let s = s.trim();
            match serde_json::from_str::<Value>(s) {
                Ok(parsed @ Value::Array(_)) => decode_id_sms(&parsed, false),
                _ if accept_scalar && !s.is_empty() => vec![s.to_string()],
                _ => vec![],
            }
        }
        Value::Number(n) if accept_scalar => vec![n.to_string()],
        _ => vec![],
    }
}
