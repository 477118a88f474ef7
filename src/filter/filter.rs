use serde::{Deserialize, Serialize};

use super::error::{FilterError, PaginationError};
use super::page_info::PageInfo;
use super::types::{SortDirection, DEFAULT_CURRENT_PAGE, DEFAULT_PER_PAGE};

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub current_page: Option<i64>,
    pub per_page: Option<i64>,
    pub keyword: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub semester: Option<String>,
}

/// Page request shared by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListFilter {
    pub current_page: i64,
    pub per_page: i64,
    pub keyword: String,
    pub sort_by: String,
    pub order: SortDirection,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            current_page: DEFAULT_CURRENT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            keyword: String::new(),
            sort_by: String::new(),
            order: SortDirection::Asc,
        }
    }
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from query parameters, collecting every violation
    /// instead of stopping at the first one.
    pub fn from_params(params: &ListParams, default_per_page: i64) -> Result<Self, Vec<FilterError>> {
        let mut filter = Self { per_page: default_per_page, ..Self::default() };
        let mut violations = Vec::new();

        let current_page = params.current_page.unwrap_or(DEFAULT_CURRENT_PAGE);
        let per_page = params.per_page.unwrap_or(default_per_page);
        if current_page < 1 {
            violations.push(FilterError::InvalidCurrentPage(current_page));
        }
        if per_page < 1 {
            violations.push(FilterError::InvalidPerPage(per_page));
        }
        filter.current_page = current_page;
        filter.per_page = per_page;

        if let Some(order) = params.order.as_deref().map(str::trim).filter(|o| !o.is_empty()) {
            match SortDirection::parse(order) {
                Some(direction) => filter.order = direction,
                None => violations.push(FilterError::InvalidOrder(order.to_string())),
            }
        }

        if let Some(keyword) = &params.keyword {
            filter.keyword = keyword.trim().to_string();
        }
        if let Some(sort_by) = &params.sort_by {
            filter.sort_by = sort_by.trim().to_string();
        }

        if violations.is_empty() {
            Ok(filter)
        } else {
            Err(violations)
        }
    }

    pub fn page(&mut self, current_page: i64, per_page: i64) -> Result<&mut Self, FilterError> {
        if current_page < 1 {
            return Err(FilterError::InvalidCurrentPage(current_page));
        }
        if per_page < 1 {
            return Err(FilterError::InvalidPerPage(per_page));
        }
        self.current_page = current_page;
        self.per_page = per_page;
        Ok(self)
    }

    pub fn search(&mut self, keyword: impl Into<String>) -> &mut Self {
        self.keyword = keyword.into();
        self
    }

    pub fn sort(&mut self, sort_by: impl Into<String>, order: SortDirection) -> &mut Self {
        self.sort_by = sort_by.into();
        self.order = order;
        self
    }

    /// Caps `per_page` to the configured maximum.
    pub fn cap_per_page(&mut self, max_per_page: Option<i64>) -> &mut Self {
        if let Some(max) = max_per_page {
            if self.per_page > max {
                tracing::warn!("per_page {} exceeds max {}, capping to max", self.per_page, max);
                self.per_page = max;
            }
        }
        self
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// (current_page - 1) * per_page, e.g. page 2 of 10 starts at row 10.
    pub fn offset(&self) -> i64 {
        (self.current_page - 1).max(0).saturating_mul(self.per_page)
    }

    pub fn has_keyword(&self) -> bool {
        !self.keyword.is_empty()
    }

    pub fn has_sort(&self) -> bool {
        !self.sort_by.is_empty()
    }

    pub fn is_desc(&self) -> bool {
        self.order == SortDirection::Desc
    }

    pub fn page_info(&self, total_data: i64) -> Result<PageInfo, PaginationError> {
        PageInfo::compute(self.current_page, self.per_page, total_data)
    }
}
