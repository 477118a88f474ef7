use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid current_page: {0}")]
    InvalidCurrentPage(i64),

    #[error("Invalid per_page: {0}")]
    InvalidPerPage(i64),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Unsupported sort column '{column}', expected one of: {}", allowed.join(", "))]
    UnknownSortColumn { column: String, allowed: Vec<String> },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("per_page must be greater than zero, got {0}")]
    InvalidPerPage(i64),

    #[error("current_page must be at least 1, got {0}")]
    InvalidCurrentPage(i64),

    #[error("total_data cannot be negative, got {0}")]
    NegativeTotal(i64),
}
