use axum::extract::{Extension, State};

use crate::api::translator::Message;
use crate::api::{ListQuery, SemesterQuery};
use crate::database::models::{StudentClass, StudentClassDetail};
use crate::error::Localize;
use crate::middleware::{ApiResponse, ApiResult, ListData, TotalData};
use crate::server::AppState;
use crate::services::StudentClassService;
use crate::types::InstanceMode;

fn service(state: &AppState, mode: InstanceMode) -> StudentClassService<'_> {
    StudentClassService::new(state.executor.as_ref(), mode, state.unflattener)
}

/// GET /api/misca/student_classes - class ids as one `|`-joined string
pub async fn list(
    State(state): State<AppState>,
    Extension(mode): Extension<InstanceMode>,
    query: ListQuery,
) -> ApiResult<ListData<StudentClass>> {
    let page = service(&state, mode)
        .list(&query.filter, query.semester.as_deref())
        .await
        .localize(&state.translator)?;
    Ok(ApiResponse::success(
        state.translator.message(Message::ListStudentClasses),
        ListData::paged(page.items, page.page_info),
    ))
}

/// GET /api/misca/student_classes/total
pub async fn total(
    State(state): State<AppState>,
    Extension(mode): Extension<InstanceMode>,
    SemesterQuery(semester): SemesterQuery,
) -> ApiResult<TotalData> {
    let total = service(&state, mode).total(semester.as_deref()).await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::TotalStudentClasses), TotalData { total }))
}

/// GET /api/misca/student_classes_details - one `kelas_perkuliahan` entry per class
pub async fn list_details(
    State(state): State<AppState>,
    Extension(mode): Extension<InstanceMode>,
    query: ListQuery,
) -> ApiResult<ListData<StudentClassDetail>> {
    let page = service(&state, mode)
        .list_details(&query.filter, query.semester.as_deref())
        .await
        .localize(&state.translator)?;
    Ok(ApiResponse::success(
        state.translator.message(Message::ListStudentClassDetails),
        ListData::paged(page.items, page.page_info),
    ))
}

/// GET /api/misca/student_classes_details/total
pub async fn total_details(
    State(state): State<AppState>,
    Extension(mode): Extension<InstanceMode>,
    SemesterQuery(semester): SemesterQuery,
) -> ApiResult<TotalData> {
    let total = service(&state, mode).total_details(semester.as_deref()).await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::TotalStudentClassDetails), TotalData { total }))
}
