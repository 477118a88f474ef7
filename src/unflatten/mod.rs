//! Rebuilds one-to-many rosters from rows aggregated with
//! `GROUP_CONCAT(... SEPARATOR '|')`.
//!
//! One column (the anchor) decides how many related records a row holds;
//! every sibling column is split on the same delimiter and zipped by index.

pub mod error;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::UnflattenError;

pub const DELIMITER: char = '|';

/// How sibling columns whose length differs from the anchor are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnflattenMode {
    /// Missing positions read as `""`; an empty column reads as all `""`.
    #[default]
    Tolerant,
    /// Any length difference fails the whole row.
    Strict,
}

impl FromStr for UnflattenMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tolerant" => Ok(UnflattenMode::Tolerant),
            "strict" => Ok(UnflattenMode::Strict),
            other => Err(format!("unknown unflatten mode: {}", other)),
        }
    }
}

impl fmt::Display for UnflattenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnflattenMode::Tolerant => write!(f, "tolerant"),
            UnflattenMode::Strict => write!(f, "strict"),
        }
    }
}

/// One related record recovered from a delimited row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRecord {
    /// Value taken from the anchor column.
    pub key: String,
    /// Sibling values, in the order the siblings were declared.
    pub fields: Vec<String>,
}

impl SubRecord {
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }
}

/// A row produced by an aggregation query that can be unflattened.
pub trait AggregatedRow: Sized {
    type Item;
    type Output;

    /// Name of the anchor column, used in mismatch errors.
    const ANCHOR: &'static str;

    fn anchor(&self) -> &str;

    /// Sibling delimited columns as `(name, value)`, in field order.
    fn siblings(&self) -> Vec<(&'static str, &str)>;

    fn item(sub: SubRecord) -> Self::Item;

    fn assemble(self, items: Vec<Self::Item>) -> Self::Output;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Unflattener {
    mode: UnflattenMode,
}

impl Unflattener {
    pub fn new(mode: UnflattenMode) -> Self {
        Self { mode }
    }

    pub fn tolerant() -> Self {
        Self::new(UnflattenMode::Tolerant)
    }

    pub fn strict() -> Self {
        Self::new(UnflattenMode::Strict)
    }

    pub fn mode(&self) -> UnflattenMode {
        self.mode
    }

    pub fn unflatten<R: AggregatedRow>(&self, row: R) -> Result<R::Output, UnflattenError> {
        let subs = self.split(R::ANCHOR, row.anchor(), &row.siblings())?;
        let items = subs.into_iter().map(R::item).collect();
        Ok(row.assemble(items))
    }

    pub fn unflatten_all<R: AggregatedRow>(&self, rows: Vec<R>) -> Result<Vec<R::Output>, UnflattenError> {
        rows.into_iter().map(|row| self.unflatten(row)).collect()
    }

    /// Splits the anchor and its siblings into sub-records ordered like the anchor.
    ///
    /// An empty anchor means the row has no related records.
    pub fn split(
        &self,
        anchor_name: &str,
        anchor: &str,
        siblings: &[(&str, &str)],
    ) -> Result<Vec<SubRecord>, UnflattenError> {
        let keys = split_values(anchor);
        let max_len = keys.len();

        let columns: Vec<Vec<&str>> = match self.mode {
            UnflattenMode::Tolerant => siblings
                .iter()
                .map(|(_, value)| {
                    if value.is_empty() {
                        vec![""; max_len]
                    } else {
                        value.split(DELIMITER).collect()
                    }
                })
                .collect(),
            UnflattenMode::Strict => {
                let mut columns = Vec::with_capacity(siblings.len());
                for (name, value) in siblings {
                    let parts: Vec<&str> = if max_len == 0 {
                        split_values(value)
                    } else {
                        value.split(DELIMITER).collect()
                    };
                    if parts.len() != max_len {
                        return Err(UnflattenError::DataMismatch {
                            anchor: anchor_name.to_string(),
                            column: name.to_string(),
                            expected: max_len,
                            actual: parts.len(),
                        });
                    }
                    columns.push(parts);
                }
                columns
            }
        };

        Ok(keys
            .into_iter()
            .enumerate()
            .map(|(i, key)| SubRecord {
                key: key.to_string(),
                fields: columns
                    .iter()
                    .map(|column| column.get(i).copied().unwrap_or("").to_string())
                    .collect(),
            })
            .collect())
    }
}

fn split_values(value: &str) -> Vec<&str> {
    if value.is_empty() {
        vec![]
    } else {
        value.split(DELIMITER).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Roster {
        owner: &'static str,
        ids: &'static str,
        names: &'static str,
        rooms: &'static str,
    }

    #[derive(Debug, PartialEq)]
    struct Entry {
        id: String,
        name: String,
        room: String,
    }

    impl AggregatedRow for Roster {
        type Item = Entry;
        type Output = (String, Vec<Entry>);

        const ANCHOR: &'static str = "ids";

        fn anchor(&self) -> &str {
            self.ids
        }

        fn siblings(&self) -> Vec<(&'static str, &str)> {
            vec![("names", self.names), ("rooms", self.rooms)]
        }

        fn item(sub: SubRecord) -> Entry {
            Entry {
                name: sub.field(0).to_string(),
                room: sub.field(1).to_string(),
                id: sub.key,
            }
        }

        fn assemble(self, items: Vec<Entry>) -> Self::Output {
            (self.owner.to_string(), items)
        }
    }

    fn entry(id: &str, name: &str, room: &str) -> Entry {
        Entry { id: id.into(), name: name.into(), room: room.into() }
    }

    #[test]
    fn zips_fully_populated_columns() {
        let row = Roster { owner: "pd-1", ids: "10|11|12", names: "A|B|C", rooms: "R1|R2|R3" };
        let (owner, items) = Unflattener::tolerant().unflatten(row).unwrap();
        assert_eq!(owner, "pd-1");
        assert_eq!(items, vec![entry("10", "A", "R1"), entry("11", "B", "R2"), entry("12", "C", "R3")]);
    }

    #[test]
    fn tolerant_expands_empty_column() {
        let row = Roster { owner: "pd-1", ids: "10|11|12", names: "A|B|C", rooms: "" };
        let (_, items) = Unflattener::tolerant().unflatten(row).unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|e| e.room.is_empty()));
    }

    #[test]
    fn tolerant_pads_short_column() {
        let row = Roster { owner: "pd-1", ids: "10|11|12", names: "X|Y", rooms: "R1|R2|R3" };
        let (_, items) = Unflattener::tolerant().unflatten(row).unwrap();
        assert_eq!(items[0].name, "X");
        assert_eq!(items[1].name, "Y");
        assert_eq!(items[2].name, "");
    }

    #[test]
    fn tolerant_ignores_extra_values() {
        let row = Roster { owner: "pd-1", ids: "10|11", names: "A|B|C", rooms: "" };
        let (_, items) = Unflattener::tolerant().unflatten(row).unwrap();
        assert_eq!(items, vec![entry("10", "A", ""), entry("11", "B", "")]);
    }

    #[test]
    fn empty_anchor_has_no_items() {
        let row = Roster { owner: "pd-1", ids: "", names: "", rooms: "" };
        let (_, items) = Unflattener::tolerant().unflatten(row).unwrap();
        assert!(items.is_empty());
        let row = Roster { owner: "pd-1", ids: "", names: "", rooms: "" };
        let (_, items) = Unflattener::strict().unflatten(row).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn strict_accepts_equal_lengths() {
        let row = Roster { owner: "pd-1", ids: "10|11", names: "A|B", rooms: "R1|R2" };
        let (_, items) = Unflattener::strict().unflatten(row).unwrap();
        assert_eq!(items, vec![entry("10", "A", "R1"), entry("11", "B", "R2")]);
    }

    #[test]
    fn strict_rejects_length_mismatch() {
        let row = Roster { owner: "pd-1", ids: "10|11", names: "A|B|C", rooms: "R1|R2" };
        let err = Unflattener::strict().unflatten(row).unwrap_err();
        assert_eq!(
            err,
            UnflattenError::DataMismatch {
                anchor: "ids".to_string(),
                column: "names".to_string(),
                expected: 2,
                actual: 3,
            }
        );
    }

    #[test]
    fn strict_does_not_expand_empty_column() {
        let row = Roster { owner: "pd-1", ids: "10|11|12", names: "A|B|C", rooms: "" };
        assert!(Unflattener::strict().unflatten(row).is_err());
    }

    #[test]
    fn unflatten_all_keeps_row_order_and_fails_fast() {
        let rows = vec![
            Roster { owner: "pd-1", ids: "10", names: "A", rooms: "R1" },
            Roster { owner: "pd-2", ids: "11|12", names: "B|C", rooms: "R2|R3" },
        ];
        let out = Unflattener::strict().unflatten_all(rows).unwrap();
        assert_eq!(out[0].0, "pd-1");
        assert_eq!(out[1].1.len(), 2);

        let rows = vec![
            Roster { owner: "pd-1", ids: "10", names: "A", rooms: "R1" },
            Roster { owner: "pd-2", ids: "11|12", names: "B", rooms: "R2|R3" },
        ];
        assert!(Unflattener::strict().unflatten_all(rows).is_err());
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("Strict".parse::<UnflattenMode>().unwrap(), UnflattenMode::Strict);
        assert_eq!(" tolerant ".parse::<UnflattenMode>().unwrap(), UnflattenMode::Tolerant);
        assert!("lenient".parse::<UnflattenMode>().is_err());
        assert_eq!(UnflattenMode::default(), UnflattenMode::Tolerant);
    }
}
