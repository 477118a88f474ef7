//! MySQL row to JSON conversion and typed decoding of JSON rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use sqlx::mysql::{MySql, MySqlRow};
use sqlx::{Column, Decode, Row, Type, TypeInfo};

use crate::database::manager::DatabaseError;

pub type JsonRow = Map<String, Value>;

/// Converts every column of a row to JSON, keyed by column label.
pub fn row_to_json(row: &MySqlRow) -> Result<JsonRow, DatabaseError> {
    let mut map = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let value = column_value(row, index, column.type_info().name())
            .or_else(|_| text_value(row, index))
            .map_err(|e| DatabaseError::Decode { column: column.name().to_string(), message: e.to_string() })?;
        map.insert(column.name().to_string(), value);
    }
    Ok(map)
}

fn column_value(row: &MySqlRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    let value = match type_name {
        "NULL" => Value::Null,
        "BOOLEAN" => get::<bool>(row, index)?.map(Value::Bool).unwrap_or(Value::Null),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            get::<i64>(row, index)?.map(Value::from).unwrap_or(Value::Null)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED" | "BIGINT UNSIGNED" => {
            get::<u64>(row, index)?.map(Value::from).unwrap_or(Value::Null)
        }
        "FLOAT" => get::<f32>(row, index)?.map(|f| float(f as f64)).unwrap_or(Value::Null),
        "DOUBLE" => get::<f64>(row, index)?.map(float).unwrap_or(Value::Null),
        "DECIMAL" => get::<Decimal>(row, index)?.map(|d| Value::String(d.to_string())).unwrap_or(Value::Null),
        "DATETIME" => get::<NaiveDateTime>(row, index)?
            .map(|d| Value::String(d.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(Value::Null),
        "TIMESTAMP" => get::<DateTime<Utc>>(row, index)?
            .map(|d| Value::String(d.to_rfc3339()))
            .unwrap_or(Value::Null),
        "DATE" => get::<NaiveDate>(row, index)?.map(|d| Value::String(d.to_string())).unwrap_or(Value::Null),
        "TIME" => get::<NaiveTime>(row, index)?.map(|t| Value::String(t.to_string())).unwrap_or(Value::Null),
        "JSON" => get::<Value>(row, index)?.unwrap_or(Value::Null),
        _ => text_value(row, index)?,
    };
    Ok(value)
}

fn get<'r, T>(row: &'r MySqlRow, index: usize) -> Result<Option<T>, sqlx::Error>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get::<Option<T>, _>(index)
}

/// Text-like and unknown columns. GROUP_CONCAT over binary collations comes
/// back as BLOB, so bytes are decoded lossily.
fn text_value(row: &MySqlRow, index: usize) -> Result<Value, sqlx::Error> {
    match row.try_get_unchecked::<Option<String>, _>(index) {
        Ok(v) => Ok(v.map(Value::String).unwrap_or(Value::Null)),
        Err(_) => {
            let bytes = row.try_get_unchecked::<Option<Vec<u8>>, _>(index)?;
            Ok(bytes
                .map(|b| Value::String(String::from_utf8_lossy(&b).into_owned()))
                .unwrap_or(Value::Null))
        }
    }
}

fn float(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

/// Maps JSON rows onto a typed record.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<JsonRow>) -> Result<Vec<T>, DatabaseError> {
    rows.into_iter().map(decode_row).collect()
}

pub fn decode_row<T: DeserializeOwned>(row: JsonRow) -> Result<T, DatabaseError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| DatabaseError::RowMapping(e.to_string()))
}

/// Deserializers that accept whatever scalar MySQL hands back, so an `INT`
/// id and a `VARCHAR` id land in the same `String` field.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn stringify(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Bool(b) => Some(if b { "1" } else { "0" }.to_string()),
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// `NULL` becomes `""`.
    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(stringify(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(stringify(Value::deserialize(deserializer)?))
    }

    /// Numbers, numeric strings and booleans; anything else is 0.
    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(opt_int_value(Value::deserialize(deserializer)?).unwrap_or(0))
    }

    pub fn opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(opt_int_value(Value::deserialize(deserializer)?))
    }

    fn opt_int_value(value: Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(b as i64),
            _ => None,
        }
    }
}
