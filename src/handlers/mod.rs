// handlers/mod.rs - two tiers
//
// Public (no api key) → Protected (api key + institution mode, under /api/misca)
pub mod protected;
pub mod public;

use crate::api::translator::Message;
use crate::error::ApiError;
use axum::extract::State;

use crate::server::AppState;

/// JSON 404 for anything no route matched.
pub async fn route_not_found(State(state): State<AppState>) -> ApiError {
    ApiError::not_found(state.translator.message(Message::RouteNotFound))
}
