use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::api::translator::{Message, Translator};
use crate::error::ApiError;

/// Renders a handler panic as a 500 envelope. The payload is logged only.
pub fn handle_panic(translator: Translator) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |payload| {
        let detail = if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else {
            "unknown panic payload"
        };
        tracing::error!("Handler panicked: {}", detail);
        ApiError::internal_server_error(translator.message(Message::InternalError), None).into_response()
    }
}
