use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::InstanceMode;

pub const INSTANCE_MODE_HEADER: &str = "x-instance-mode";

/// Resolves the institution schema for the request from `X-Instance-Mode`,
/// falling back to the configured default, and injects it as an extension.
pub async fn resolve_instance_mode(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(INSTANCE_MODE_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    let mode = match header.as_deref().map(str::trim) {
        None | Some("") => state.config.app.default_instance_mode,
        Some(value) => value
            .parse::<InstanceMode>()
            .map_err(|_| ApiError::validation(state.translator.invalid_instance_mode(value)))?,
    };

    request.extensions_mut().insert(mode);
    Ok(next.run(request).await)
}
