//! HTTP error mapping
//!
//! Wraps [`CoreError`] for axum handlers. The response body carries the
//! stable wire code plus the structured detail the presentation layer
//! needs to tell "your configuration is incomplete" apart from "this
//! action isn't allowed right now".

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shared::CoreError;

/// Error returned by API handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(err) => match err {
                CoreError::InvalidConfig { .. } | CoreError::InvalidPayload { .. } => {
                    StatusCode::BAD_REQUEST
                }
                CoreError::InvalidTransition { .. } => StatusCode::CONFLICT,
                CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                CoreError::PaymentNotConfirmed => StatusCode::PAYMENT_REQUIRED,
                CoreError::ConcurrencyConflict { .. } => StatusCode::SERVICE_UNAVAILABLE,
                CoreError::ExternalTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            Self::Core(err) => {
                let mut body = json!({
                    "code": err.code(),
                    "message": err.to_string(),
                    "retryable": err.is_retryable(),
                });
                match err {
                    CoreError::InvalidConfig { field, reason } => {
                        body["field"] = json!(field);
                        body["reason"] = json!(reason);
                    }
                    CoreError::InvalidPayload { field } => {
                        body["field"] = json!(field);
                    }
                    CoreError::InvalidTransition { current, requested } => {
                        body["current"] = json!(current);
                        body["requested"] = json!(requested);
                    }
                    _ => {}
                }
                body
            }
            Self::Internal(message) => json!({
                "code": "INTERNAL_ERROR",
                "message": message,
                "retryable": false,
            }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_)) {
            tracing::error!(error = %self, "Internal error surfaced to client");
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

/// Map the first field failure of a request DTO validation
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .into_keys()
            .next()
            .and_then(|key| match key {
                std::borrow::Cow::Borrowed(name) => Some(name),
                std::borrow::Cow::Owned(_) => None,
            })
            .unwrap_or("request");
        Self::Core(CoreError::invalid_payload(field))
    }
}
