//! Query services, one per resource. Each picks the SQL for the caller's
//! instance mode and returns typed records.

pub mod api_keys;
pub mod classes;
pub mod lecturers;
pub mod rooms;
pub mod semesters;
pub mod student_classes;
pub mod students;
pub mod study_programs;

use thiserror::Error;

use crate::database::{DatabaseError, JsonRow, QueryExecutor, SelectQuery};
use crate::filter::{FilterError, ListFilter, PageInfo, PaginationError};
use crate::unflatten::UnflattenError;

pub use api_keys::ApiKeyService;
pub use classes::ClassService;
pub use lecturers::LecturerService;
pub use rooms::RoomService;
pub use semesters::SemesterService;
pub use student_classes::StudentClassService;
pub use students::StudentService;
pub use study_programs::StudyProgramService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    Unflatten(#[from] UnflattenError),

    #[error("Active semester not found")]
    ActiveSemesterNotFound,
}

/// One page of records plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

/// Counts the unpaged result, then fetches the requested page.
///
/// The count runs first so `page_info` reflects the same predicates as the
/// rows; both use the offset the filter asked for.
pub async fn fetch_page(
    executor: &dyn QueryExecutor,
    query: SelectQuery,
    filter: &ListFilter,
) -> Result<(Vec<JsonRow>, PageInfo), ServiceError> {
    let total = executor.fetch_count(&query.to_count_sql()).await?;
    let rows = executor.fetch_all(&query.paginate(filter).to_sql()).await?;
    let page_info = filter.page_info(total)?;
    tracing::debug!(total, returned = rows.len(), page = filter.current_page, "Fetched page");
    Ok((rows, page_info))
}

pub async fn fetch_total(executor: &dyn QueryExecutor, query: &SelectQuery) -> Result<i64, ServiceError> {
    Ok(executor.fetch_count(&query.to_count_sql()).await?)
}
