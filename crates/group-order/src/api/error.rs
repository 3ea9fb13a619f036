//! Error types for HTTP handlers.
//!
//! [`ApiError`] bridges the actor error enums to HTTP responses:
//!
//! | Condition | Status | `code` |
//! |---|---|---|
//! | `NotFound` | 404 | `NOT_FOUND` |
//! | `Forbidden` (locked order) | 403 | `FORBIDDEN` |
//! | `InvalidInput`, malformed body or path | 400 | `INVALID_INPUT` |
//! | anything else | 500 | `INTERNAL_SERVER_ERROR` |
//!
//! Bodies are `{"error": <message>, "code": <code>}`. Server errors are
//! logged with their cause; the client only sees a generic message.

use crate::menu_actor::MenuError;
use crate::order_actor::OrderError;
use crate::restaurant_actor::RestaurantError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: &'static str,
    /// Logged for server errors, never sent to the client.
    cause: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            code,
            cause: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "INVALID_INPUT")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message, "FORBIDDEN")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    pub fn internal(cause: impl fmt::Display) -> Self {
        Self {
            cause: Some(cause.to_string()),
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred",
                "INTERNAL_SERVER_ERROR",
            )
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                code = self.code,
                cause = self.cause.as_deref().unwrap_or("unknown"),
                "Internal server error"
            );
        }
        let body = ErrorBody {
            error: &self.message,
            code: self.code,
        };
        (self.status, axum::Json(body)).into_response()
    }
}

impl From<RestaurantError> for ApiError {
    fn from(e: RestaurantError) -> Self {
        match e {
            RestaurantError::NotFound(_) => Self::not_found(e.to_string()),
            RestaurantError::InvalidInput(_) => Self::bad_request(e.to_string()),
            other => Self::internal(other),
        }
    }
}

impl From<MenuError> for ApiError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::NotFound(_) => Self::not_found(e.to_string()),
            MenuError::InvalidInput(_) => Self::bad_request(e.to_string()),
            other => Self::internal(other),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) => Self::not_found(e.to_string()),
            OrderError::Forbidden(_) => Self::forbidden(e.to_string()),
            OrderError::InvalidInput(_) => Self::bad_request(e.to_string()),
            other => Self::internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// `axum::Json` whose rejection is an [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` whose rejection is an [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_errors_map_to_statuses() {
        let cases = [
            (OrderError::NotFound("order_1".into()), StatusCode::NOT_FOUND),
            (OrderError::Forbidden("order_1 is locked".into()), StatusCode::FORBIDDEN),
            (OrderError::InvalidInput("price is required".into()), StatusCode::BAD_REQUEST),
            (OrderError::Conflict("dup".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (OrderError::DatabaseError("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let err = ApiError::internal("connection refused");
        assert_eq!(err.to_string(), "[INTERNAL_SERVER_ERROR] An internal error occurred");
    }
}
