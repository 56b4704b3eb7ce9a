//! Unified error handling.
//!
//! Provides a unified `AppError` type for route handlers. All handlers
//! return `Result<T, AppError>`; the `IntoResponse` impl maps each variant
//! to a status code and a JSON body with a client-safe Spanish message.
//! Failures stay local to the request that hit them - nothing escalates to
//! a process-level handler and nothing is retried here.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ServiceError;

/// Application-level error type for the storefront gateway.
#[derive(Debug, Error)]
pub enum AppError {
    /// A remote collection call failed.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Session read or write failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// User is not authenticated (or lacks the required role).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request conflicts with current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Form validation failed; one message per offending field.
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Service(_) | Self::Session(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request error");
        }

        let status = match &self {
            Self::Service(err) => match err {
                ServiceError::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        // Don't expose upstream or internal detail to clients
        let (error, fields) = match self {
            Self::Service(ServiceError::NotFound) => ("No encontrado.".to_string(), None),
            Self::Service(_) => ("Servicio no disponible. Intente de nuevo.".to_string(), None),
            Self::Session(_) | Self::Internal(_) => ("Error interno del servidor.".to_string(), None),
            Self::Validation(fields) => ("Revisa los campos marcados.".to_string(), Some(fields)),
            Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::BadRequest(msg)
            | Self::Conflict(msg) => (msg, None),
        };

        (status, Json(ErrorBody { error, fields })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
