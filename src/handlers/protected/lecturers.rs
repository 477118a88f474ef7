use axum::extract::{Extension, State};

use crate::api::translator::Message;
use crate::api::ListQuery;
use crate::database::models::Lecturer;
use crate::error::Localize;
use crate::middleware::{ApiResponse, ApiResult, ListData, TotalData};
use crate::server::AppState;
use crate::services::LecturerService;
use crate::types::InstanceMode;

/// GET /api/misca/lecturers - paginated, `keyword` matches name or NIK
pub async fn list(
    State(state): State<AppState>,
    Extension(mode): Extension<InstanceMode>,
    query: ListQuery,
) -> ApiResult<ListData<Lecturer>> {
    let page = LecturerService::new(state.executor.as_ref(), mode)
        .list(&query.filter)
        .await
        .localize(&state.translator)?;
    Ok(ApiResponse::success(
        state.translator.message(Message::ListLecturers),
        ListData::paged(page.items, page.page_info),
    ))
}

/// GET /api/misca/lecturers/total
pub async fn total(State(state): State<AppState>, Extension(mode): Extension<InstanceMode>) -> ApiResult<TotalData> {
    let total = LecturerService::new(state.executor.as_ref(), mode).total().await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::TotalLecturers), TotalData { total }))
}
