use serde_json::Value;

pub struct FilterWhere;

impl FilterWhere {
    /// Builds `(a LIKE ? OR b LIKE ?)` matching the keyword anywhere in any
    /// of the columns. Returns `None` for an empty keyword or column list.
    pub fn keyword(columns: &[&str], keyword: &str) -> Option<(String, Vec<Value>)> {
        if keyword.is_empty() || columns.is_empty() {
            return None;
        }
        let pattern = format!("%{}%", keyword);
        let predicates: Vec<String> = columns.iter().map(|c| format!("{} LIKE ?", c)).collect();
        let params = columns.iter().map(|_| Value::String(pattern.clone())).collect();
        Some((format!("({})", predicates.join(" OR ")), params))
    }
}
