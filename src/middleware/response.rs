use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::filter::PageInfo;

/// Body of every response, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub status: String,
    pub message: String,
    pub success: bool,
    pub data: T,
    pub errors: Option<String>,
}

/// Serializes as `{}`; the `data` of a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

impl<T> Envelope<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T, errors: Option<String>) -> Self {
        Self {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or_default().to_string(),
            message: message.into(),
            success: status.is_success(),
            data,
            errors,
        }
    }
}

impl Envelope<Empty> {
    pub fn failure(status: StatusCode, message: impl Into<String>, errors: Option<String>) -> Self {
        Self::new(status, message, Empty {}, errors)
    }
}

/// `data` of list endpoints. `page_info` is null for unpaginated lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListData<T> {
    pub list: Vec<T>,
    pub page_info: Option<PageInfo>,
}

impl<T> ListData<T> {
    pub fn paged(list: Vec<T>, page_info: PageInfo) -> Self {
        Self { list, page_info: Some(page_info) }
    }

    pub fn all(list: Vec<T>) -> Self {
        Self { list, page_info: None }
    }
}

/// `data` of `/total` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalData {
    pub total: i64,
}

/// Successful response wrapped in the envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with the given message
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data, status_code: StatusCode::OK }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope::new(self.status_code, self.message, self.data, None);
        (self.status_code, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let envelope = Envelope::new(StatusCode::OK, "Successfully retrieved rooms", ListData::<i64>::all(vec![1, 2]), None);
        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            body,
            json!({
                "code": 200,
                "status": "OK",
                "message": "Successfully retrieved rooms",
                "success": true,
                "data": {"list": [1, 2], "page_info": null},
                "errors": null
            })
        );
    }

    #[test]
    fn total_data_shape() {
        let body = serde_json::to_value(TotalData { total: 7 }).unwrap();
        assert_eq!(body, json!({"total": 7}));
    }
}
