use axum::extract::{Extension, State};

use crate::api::translator::Message;
use crate::database::models::{ActiveSemester, Semester};
use crate::error::Localize;
use crate::middleware::{ApiResponse, ApiResult, ListData};
use crate::server::AppState;
use crate::services::SemesterService;
use crate::types::InstanceMode;

/// GET /api/misca/semesters - every semester, unpaginated
pub async fn list(State(state): State<AppState>, Extension(mode): Extension<InstanceMode>) -> ApiResult<ListData<Semester>> {
    let semesters = SemesterService::new(state.executor.as_ref(), mode).list().await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::ListSemesters), ListData::all(semesters)))
}

/// GET /api/misca/semesters/active
pub async fn active(State(state): State<AppState>, Extension(mode): Extension<InstanceMode>) -> ApiResult<ActiveSemester> {
    let semester = SemesterService::new(state.executor.as_ref(), mode).active().await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::ActiveSemester), semester))
}
