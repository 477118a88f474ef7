use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Parses `asc`/`desc` in any case. Anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }
}

/// Per-endpoint description of what a list query may search and sort on.
///
/// `sort_columns` maps the public `sort_by` name to the SQL expression used
/// in `ORDER BY`; `default_order` is emitted verbatim when no sort is requested.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    pub keyword_columns: &'static [&'static str],
    pub sort_columns: &'static [(&'static str, &'static str)],
    pub default_order: &'static str,
}

impl ListSpec {
    pub fn sort_expression(&self, name: &str) -> Option<&'static str> {
        self.sort_columns
            .iter()
            .find(|(public, _)| *public == name)
            .map(|(_, expr)| *expr)
    }

    pub fn sort_names(&self) -> Vec<&'static str> {
        self.sort_columns.iter().map(|(public, _)| *public).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub expression: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}

impl SqlResult {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), params: vec![] }
    }
}
