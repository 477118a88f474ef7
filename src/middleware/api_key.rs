use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::translator::Message;
use crate::error::{ApiError, Localize};
use crate::server::AppState;
use crate::services::ApiKeyService;

/// Rejects requests without an active key from `api_key_list` and injects
/// the matched `ApiKey` for later extractors.
pub async fn require_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let translator = state.translator;
    let key = extract_api_key(&headers).map_err(|msg| ApiError::unauthorized(translator.message(msg)))?;

    let api_key = ApiKeyService::new(state.executor.as_ref())
        .find(key)
        .await
        .localize(&translator)?
        .ok_or_else(|| ApiError::unauthorized(translator.message(Message::ApiKeyNotFound)))?;

    if !api_key.is_active() {
        tracing::warn!(api_key_id = %api_key.id, "Rejected inactive api key");
        return Err(ApiError::unauthorized(translator.message(Message::ApiKeyInactive)));
    }

    tracing::debug!(api_key_id = %api_key.id, name = %api_key.name, "Api key accepted");
    request.extensions_mut().insert(api_key);
    Ok(next.run(request).await)
}

/// Key from `Authorization: <scheme> <key>`; the scheme is not checked.
fn extract_api_key(headers: &HeaderMap) -> Result<&str, Message> {
    let value = headers.get(header::AUTHORIZATION).ok_or(Message::ApiKeyNotFound)?;
    let value = value.to_str().map_err(|_| Message::ApiKeyMalformed)?;

    let mut fields = value.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(_scheme), Some(key)) => Ok(key),
        _ => Err(Message::ApiKeyMalformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn takes_second_field() {
        assert_eq!(extract_api_key(&headers("Bearer abc123")), Ok("abc123"));
        assert_eq!(extract_api_key(&headers("Token  abc123")), Ok("abc123"));
    }

    #[test]
    fn missing_and_malformed() {
        assert_eq!(extract_api_key(&HeaderMap::new()), Err(Message::ApiKeyNotFound));
        assert_eq!(extract_api_key(&headers("abc123")), Err(Message::ApiKeyMalformed));
        assert_eq!(extract_api_key(&headers("")), Err(Message::ApiKeyMalformed));
    }
}
