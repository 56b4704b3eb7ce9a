//! Clients for the four remote REST collections.
//!
//! # Architecture
//!
//! Every page of the legacy client re-implemented the same loop: issue an
//! HTTP request against one of four service base URLs, parse a JSON array
//! or object, and fold it into view state. Here that convention is a real
//! module: one client per service, each a cheap `Clone` handle over an `Arc`
//! inner holding the shared `reqwest::Client` and the base URL.
//!
//! The services are the source of truth - no local sync, direct API calls.
//! No call is retried automatically and no call carries its own timeout
//! (reqwest defaults apply); failures are handled per call site.

mod autos;
mod carrito;
mod ordenes;
mod usuarios;

pub use autos::AutosClient;
pub use carrito::CarritoClient;
pub use ordenes::OrdenesClient;
pub use usuarios::{Credentials, UsuariosClient};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Errors that can occur when talking to a remote collection.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP transport failed (connection refused, DNS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status {
        /// Response status code.
        status: StatusCode,
        /// Response body, truncated for logging.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The resource does not exist.
    #[error("not found")]
    NotFound,
}

impl ServiceError {
    /// The HTTP status the service answered with, if this is a status error.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Build the URL of a single item under a collection base URL.
pub(crate) fn item_url(base: &Url, segment: &impl ToString) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), segment.to_string())
}

/// Decode a JSON response body, mapping non-success statuses to errors.
///
/// The body is read as text first so a malformed payload can be logged.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(ServiceError::NotFound);
    }

    let text = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %truncate(&text, 500),
            "service returned non-success status"
        );
        return Err(ServiceError::Status {
            status,
            body: truncate(&text, 200),
        });
    }

    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(
                error = %e,
                body = %truncate(&text, 500),
                "failed to parse service response"
            );
            Err(ServiceError::Parse(e))
        }
    }
}

/// Check a response for success, discarding the body.
///
/// Used for mutations whose response body the gateway does not consume.
pub(crate) async fn expect_success(response: reqwest::Response) -> Result<(), ServiceError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(ServiceError::NotFound);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %truncate(&body, 500),
            "service mutation failed"
        );
        return Err(ServiceError::Status {
            status,
            body: truncate(&body, 200),
        });
    }

    Ok(())
}

/// Truncate a string to at most `max` characters.
fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
