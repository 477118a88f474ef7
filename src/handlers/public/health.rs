use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::translator::Message;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// GET / - name, version and environment of the running service
pub async fn service_info(State(state): State<AppState>) -> ApiResult<ServiceInfo> {
    let info = ServiceInfo {
        name: state.config.app.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: format!("{:?}", state.config.environment).to_lowercase(),
    };
    Ok(ApiResponse::success(state.translator.message(Message::ServiceInfo), info))
}

/// GET /live - the process answers
pub async fn live() -> ApiResult<Health> {
    Ok(ApiResponse::success("ok", Health { status: "ok".into(), timestamp: chrono::Utc::now() }))
}

/// GET /ready - the database answers a ping
pub async fn ready(State(state): State<AppState>) -> ApiResult<Health> {
    match state.executor.ping().await {
        Ok(()) => Ok(ApiResponse::success("ok", Health { status: "ok".into(), timestamp: chrono::Utc::now() })),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            Err(ApiError::service_unavailable(state.translator.message(Message::DatabaseUnavailable)))
        }
    }
}
