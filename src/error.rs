// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::{Field, FieldError, SessionError, StoreError};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    InvalidField(FieldError),

    #[error("Form conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    /// Form field to highlight
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<Field>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, field) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone()), None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()), None)
            }
            AppError::InvalidField(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_field",
                Some(err.message().to_string()),
                Some(err.field),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "form_conflict", Some(msg.clone()), None),
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None, None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None, None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Field(e) => AppError::InvalidField(e),
            SessionError::FormConflict | SessionError::NoOpenForm => {
                AppError::Conflict(err.to_string())
            }
            SessionError::Store(StoreError::NotFound(id)) => {
                AppError::NotFound(format!("Workout {} not found", id))
            }
            SessionError::Store(e) => AppError::Internal(e.into()),
            SessionError::Storage(e) => AppError::Storage(e.to_string()),
            SessionError::Codec(e) => AppError::Internal(e.into()),
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
