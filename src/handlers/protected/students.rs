use axum::extract::{Extension, State};

use crate::api::translator::Message;
use crate::api::ListQuery;
use crate::database::models::Student;
use crate::error::Localize;
use crate::middleware::{ApiResponse, ApiResult, ListData, TotalData};
use crate::server::AppState;
use crate::services::StudentService;
use crate::types::InstanceMode;

/// GET /api/misca/students - paginated, `keyword` matches name or NIK
pub async fn list(
    State(state): State<AppState>,
    Extension(mode): Extension<InstanceMode>,
    query: ListQuery,
) -> ApiResult<ListData<Student>> {
    let page = StudentService::new(state.executor.as_ref(), mode)
        .list(&query.filter)
        .await
        .localize(&state.translator)?;
    Ok(ApiResponse::success(
        state.translator.message(Message::ListStudents),
        ListData::paged(page.items, page.page_info),
    ))
}

/// GET /api/misca/students/total
pub async fn total(State(state): State<AppState>, Extension(mode): Extension<InstanceMode>) -> ApiResult<TotalData> {
    let total = StudentService::new(state.executor.as_ref(), mode).total().await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::TotalStudents), TotalData { total }))
}
