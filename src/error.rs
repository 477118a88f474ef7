// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::api::translator::{Message, Translator};
use crate::middleware::response::{Empty, Envelope};
use crate::services::ServiceError;

/// HTTP API error with its status code and client-facing message.
///
/// Every variant renders the same envelope as a success, with `success`
/// false, an empty `data` object and the detail (if any) in `errors`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest { message: String, errors: Option<String> },

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError { message: String, errors: Option<String> },

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError { message, .. } => message,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn errors(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { errors, .. } | ApiError::InternalServerError { errors, .. } => errors.as_deref(),
            ApiError::Unauthorized(msg) | ApiError::NotFound(msg) | ApiError::ServiceUnavailable(msg) => Some(msg),
        }
    }

    pub fn to_envelope(&self) -> Envelope<Empty> {
        Envelope::failure(self.status_code(), self.message(), self.errors().map(str::to_string))
    }
}

impl ApiError {
    /// Validation failure; the joined violations are both message and detail.
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        ApiError::BadRequest { errors: Some(message.clone()), message }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>, errors: Option<String>) -> Self {
        ApiError::InternalServerError { message: message.into(), errors }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    /// Maps a service failure to its HTTP form, rendering messages in the
    /// translator's locale. Database details are logged and withheld.
    pub fn from_service(err: ServiceError, translator: &Translator) -> Self {
        match err {
            ServiceError::Filter(e) => ApiError::validation(translator.filter_error(&e)),
            ServiceError::Pagination(e) => ApiError::validation(translator.pagination_error(&e)),
            ServiceError::ActiveSemesterNotFound => {
                ApiError::not_found(translator.message(Message::ActiveSemesterNotFound))
            }
            ServiceError::Unflatten(e) => {
                ApiError::internal_server_error(translator.message(Message::DataMismatch), Some(e.to_string()))
            }
            ServiceError::Database(e) if e.is_unavailable() => {
                tracing::error!("Database unavailable: {}", e);
                ApiError::service_unavailable(translator.message(Message::DatabaseUnavailable))
            }
            ServiceError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ApiError::internal_server_error(translator.message(Message::InternalError), None)
            }
        }
    }
}

/// Localizes service results at the handler boundary, where the
/// translator is in reach.
pub trait Localize<T> {
    fn localize(self, translator: &Translator) -> Result<T, ApiError>;
}

impl<T> Localize<T> for Result<T, ServiceError> {
    fn localize(self, translator: &Translator) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_service(e, translator))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}
