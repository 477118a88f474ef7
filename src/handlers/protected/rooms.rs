use axum::extract::{Extension, State};

use crate::api::translator::Message;
use crate::database::models::Room;
use crate::error::Localize;
use crate::middleware::{ApiResponse, ApiResult, ListData, TotalData};
use crate::server::AppState;
use crate::services::RoomService;
use crate::types::InstanceMode;

/// GET /api/misca/rooms - every room, unpaginated
pub async fn list(State(state): State<AppState>, Extension(mode): Extension<InstanceMode>) -> ApiResult<ListData<Room>> {
    let rooms = RoomService::new(state.executor.as_ref(), mode).list().await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::ListRooms), ListData::all(rooms)))
}

/// GET /api/misca/rooms/total
pub async fn total(State(state): State<AppState>, Extension(mode): Extension<InstanceMode>) -> ApiResult<TotalData> {
    let total = RoomService::new(state.executor.as_ref(), mode).total().await.localize(&state.translator)?;
    Ok(ApiResponse::success(state.translator.message(Message::TotalRooms), TotalData { total }))
}
