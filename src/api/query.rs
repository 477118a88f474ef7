use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::error::ApiError;
use crate::filter::{ListFilter, ListParams};
use crate::server::AppState;

/// Validated list parameters of a request.
///
/// Every violation is reported at once as a single 400 message. `per_page`
/// is capped by the configured maximum after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: ListFilter,
    pub semester: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for ListQuery {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let translator = state.translator;
        let Query(params) = Query::<ListParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::validation(translator.malformed_query(&rejection.body_text())))?;

        let pagination = &state.config.pagination;
        let mut filter = ListFilter::from_params(&params, pagination.default_per_page)
            .map_err(|violations| ApiError::validation(translator.filter_errors(&violations)))?;
        filter.cap_per_page(pagination.max_per_page);

        let semester = params.semester.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Ok(ListQuery { filter, semester })
    }
}

/// Optional `semester` of the `/total` endpoints, which take no paging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemesterQuery(pub Option<String>);

#[async_trait]
impl FromRequestParts<AppState> for SemesterQuery {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::validation(state.translator.malformed_query(&rejection.body_text())))?;
        Ok(SemesterQuery(params.semester.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())))
    }
}
