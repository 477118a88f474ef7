use axum::extract::{Extension, State};

use crate::api::translator::Message;
use crate::database::JsonRow;
use crate::error::Localize;
use crate::middleware::{ApiResponse, ApiResult, ListData, TotalData};
use crate::server::AppState;
use crate::services::StudyProgramService;
use crate::types::InstanceMode;

/// GET /api/misca/study_programs - every study program, unpaginated
pub async fn list(State(state): State<AppState>, Extension(mode): Extension<InstanceMode>) -> ApiResult<ListData<JsonRow>> {
    let study_programs = StudyProgramService::new(state.executor.as_ref(), mode).list().await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::ListStudyPrograms), ListData::all(study_programs)))
}

/// GET /api/misca/study_programs/total
pub async fn total(State(state): State<AppState>, Extension(mode): Extension<InstanceMode>) -> ApiResult<TotalData> {
    let total = StudyProgramService::new(state.executor.as_ref(), mode).total().await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::TotalStudyPrograms), TotalData { total }))
}
