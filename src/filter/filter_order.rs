use super::error::FilterError;
use super::filter::ListFilter;
use super::types::{FilterOrderInfo, ListSpec};

pub struct FilterOrder;

impl FilterOrder {
    /// Resolves the requested sort against the endpoint's allow-list.
    /// Returns `None` when no sort was requested.
    pub fn resolve(filter: &ListFilter, spec: &ListSpec) -> Result<Option<FilterOrderInfo>, FilterError> {
        if !filter.has_sort() {
            return Ok(None);
        }
        let expression = spec.sort_expression(&filter.sort_by).ok_or_else(|| FilterError::UnknownSortColumn {
            column: filter.sort_by.clone(),
            allowed: spec.sort_names().into_iter().map(str::to_string).collect(),
        })?;
        Ok(Some(FilterOrderInfo { expression: expression.to_string(), sort: filter.order }))
    }

    pub fn generate(info: Option<&FilterOrderInfo>, spec: &ListSpec) -> String {
        match info {
            Some(i) => format!("{} {}", i.expression, i.sort.to_sql()),
            None => spec.default_order.to_string(),
        }
    }
}
