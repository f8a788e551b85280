//! Centralized error handling.
//!
//! Every failure raised by a handler, extractor, service or repository ends
//! up as an [`AppError`], which is translated into a uniform JSON payload
//! at the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::ERROR_TIMESTAMP_FORMAT;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Lookup miss by id or email
    #[error("{0}")]
    NotFound(String),

    /// Datastore constraint breach (e.g. duplicate email)
    #[error("{0}")]
    ConstraintViolation(String),

    /// Malformed input rejected before reaching the service layer
    #[error("{0}")]
    Validation(String),

    /// Known route, unsupported HTTP verb
    #[error("{0}")]
    MethodNotSupported(String),

    #[error("Database error")]
    Database(DbErr),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Upper-snake status name
    #[schema(example = "NOT_FOUND")]
    pub http_status: String,
    /// Translation time, `dd-MM-yyyy hh:mm:ss`
    #[schema(example = "10-02-2024 03:15:42")]
    pub created_at: String,
    #[schema(example = "User not found with email: john@example.com")]
    pub message: String,
}

impl ErrorResponse {
    /// Build a payload for `status`, stamped with the current local time.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            http_status: status_name(status),
            created_at: Local::now().format(ERROR_TIMESTAMP_FORMAT).to_string(),
            message: message.into(),
        }
    }
}

/// `StatusCode::NOT_FOUND` -> `"NOT_FOUND"`
fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(|reason| reason.to_uppercase().replace([' ', '-'], "_"))
        .unwrap_or_else(|| status.as_u16().to_string())
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotSupported(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            other => tracing::error!("{}", other),
        }

        let status = self.status();
        let body = ErrorResponse::new(status, self.user_message());

        (status, Json(body)).into_response()
    }
}

/// Classify driver errors so constraint breaches get their own kind.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
            | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                AppError::ConstraintViolation(msg)
            }
            _ => AppError::Database(err),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_are_upper_snake_case() {
        assert_eq!(status_name(StatusCode::NOT_FOUND), "NOT_FOUND");
        assert_eq!(status_name(StatusCode::BAD_REQUEST), "BAD_REQUEST");
        assert_eq!(
            status_name(StatusCode::METHOD_NOT_ALLOWED),
            "METHOD_NOT_ALLOWED"
        );
    }

    #[test]
    fn error_kinds_map_to_statuses() {
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::ConstraintViolation("dup".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MethodNotSupported("nope".into()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = AppError::internal("connection pool exhausted");
        assert_eq!(err.user_message(), "An internal error occurred");

        let err = AppError::not_found("User not found with email: a@b.c");
        assert_eq!(err.user_message(), "User not found with email: a@b.c");
    }

    #[test]
    fn payload_timestamp_matches_pattern() {
        let payload = ErrorResponse::new(StatusCode::NOT_FOUND, "missing");

        // %I has no AM/PM marker, so only the shape is checked
        assert_eq!(payload.created_at.len(), "dd-MM-yyyy hh:mm:ss".len());
        assert_eq!(&payload.created_at[2..3], "-");
        assert_eq!(&payload.created_at[10..11], " ");
        assert_eq!(payload.http_status, "NOT_FOUND");
    }

    #[test]
    fn non_sql_db_errors_stay_database_errors() {
        let err = AppError::from(DbErr::Custom("boom".into()));
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let payload = ErrorResponse::new(StatusCode::BAD_REQUEST, "Invalid email format");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["httpStatus"], "BAD_REQUEST");
        assert_eq!(json["message"], "Invalid email format");
        assert!(json["createdAt"].is_string());
    }
}
