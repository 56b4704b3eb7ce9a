//! Authentication extractors.
//!
//! Handlers take [`RequireAuth`], [`OptionalAuth`], or [`RequireAdmin`] as
//! parameters; the session is read once per request through serde, so a
//! missing or malformed stored user is treated as signed out.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a signed-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hola, {}!", user.nombre)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Extractor that requires a signed-in user with the ADMIN role.
pub struct RequireAdmin(pub CurrentUser);

/// Error returned when authentication (or the admin role) is missing.
pub enum AuthRejection {
    /// Not signed in.
    NotSignedIn,
    /// Signed in but not an administrator.
    NotAdmin,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotSignedIn => (StatusCode::UNAUTHORIZED, "Debes iniciar sesión."),
            Self::NotAdmin => (StatusCode::FORBIDDEN, "Requiere rol de administrador."),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Read the current user from the request's session, if any.
async fn current_user_from_parts(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user_from_parts(parts)
            .await
            .map(Self)
            .ok_or(AuthRejection::NotSignedIn)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user_from_parts(parts)
            .await
            .ok_or(AuthRejection::NotSignedIn)?;
        if !user.is_admin() {
            return Err(AuthRejection::NotAdmin);
        }
        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request when nobody is
/// signed in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user_from_parts(parts).await))
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user and everything else in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
