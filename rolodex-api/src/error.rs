/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the
/// appropriate status code and a JSON body of the shape
/// `{"errors": "message"}` or, for validation failures,
/// `{"errors": [{"field": ..., "message": ...}, ...]}`.
///
/// Only two error kinds are part of the resource contract: validation
/// failures (400, field-level detail, user-correctable) and not-found
/// failures (404, static message). A 404 deliberately does not distinguish
/// "does not exist" from "owned by someone else". Anything unexpected
/// surfaces as a 500 with no detail beyond a log line.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - e.g., registering a taken username
    BadRequest(String),

    /// Unauthorized (401) - missing or unknown token, failed login
    Unauthorized(String),

    /// Not found (404) - missing row or row owned by another user
    NotFound(String),

    /// Validation failure (400) with field-level detail
    Validation(Vec<FieldError>),

    /// Internal server error (500)
    Internal(String),
}

/// A single field-level validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// The `errors` value of an error response: either a static message or a
/// list of field errors
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub errors: ErrorDetail,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorDetail::Message(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorDetail::Message(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorDetail::Message(msg)),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, ErrorDetail::Fields(errors)),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail::Message("Internal server error".to_string()),
                )
            }
        };

        (status, Json(ErrorBody { errors: detail })).into_response()
    }
}

/// Validates a request payload, collecting every violated field
///
/// This is the single validation routine shared by all handlers: it turns
/// the derive-based rules on a request struct into the API's structured
/// field-error list.
pub fn validate_request(req: &impl Validate) -> Result<(), ApiError> {
    req.validate().map_err(|e| {
        let errors: Vec<FieldError> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::Validation(errors)
    })
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to API errors
impl From<rolodex_shared::auth::password::PasswordError> for ApiError {
    fn from(err: rolodex_shared::auth::password::PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}
