// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every error renders as `{"error": <code>, "details": <text>?}`. Store
//! failures are logged and never leak their cause to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No bearer token on a protected route
    #[error("Authentication required")]
    Unauthorized,

    /// Bearer token present but bad signature, expired, or no subject
    #[error("Invalid or expired token")]
    InvalidToken,

    /// A log named an activity that is not in the catalog
    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Request body failed its field rules
    #[error("Invalid request fields: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UnknownActivity(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the web client.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::InvalidToken => "invalid_token",
            AppError::UnknownActivity(_) => "unknown_activity",
            AppError::BadRequest(_) => "bad_request",
            AppError::Validation(_) => "invalid_fields",
            AppError::Database(_) => "database_error",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            AppError::UnknownActivity(id) => Some(format!("Activity {} not found", id)),
            AppError::BadRequest(msg) => Some(msg.clone()),
            AppError::Validation(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort();
                Some(fields.join(", "))
            }
            AppError::Unauthorized | AppError::InvalidToken | AppError::Database(_) => None,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Database(msg) = &self {
            tracing::error!(error = %msg, "Database error");
        }

        let body = ErrorResponse {
            error: self.code(),
            details: self.details(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
