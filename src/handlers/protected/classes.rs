use axum::extract::{Extension, State};

use crate::api::translator::Message;
use crate::api::{ListQuery, SemesterQuery};
use crate::database::models::Class;
use crate::error::Localize;
use crate::middleware::{ApiResponse, ApiResult, ListData, TotalData};
use crate::server::AppState;
use crate::services::ClassService;
use crate::types::InstanceMode;

/// GET /api/misca/classes - paginated; `semester` defaults to the active one
pub async fn list(
    State(state): State<AppState>,
    Extension(mode): Extension<InstanceMode>,
    query: ListQuery,
) -> ApiResult<ListData<Class>> {
    let page = ClassService::new(state.executor.as_ref(), mode)
        .list(&query.filter, query.semester.as_deref())
        .await
        .localize(&state.translator)?;
    Ok(ApiResponse::success(
        state.translator.message(Message::ListClasses),
        ListData::paged(page.items, page.page_info),
    ))
}

/// GET /api/misca/classes/total
pub async fn total(
    State(state): State<AppState>,
    Extension(mode): Extension<InstanceMode>,
    SemesterQuery(semester): SemesterQuery,
) -> ApiResult<TotalData> {
    let total = ClassService::new(state.executor.as_ref(), mode)
        .total(semester.as_deref())
        .await
        .localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::TotalClasses), TotalData { total }))
}
