//! Authentication route handlers.
//!
//! Login goes through the usuarios service with one exception: the
//! hardcoded administrator account is resolved locally and never touches
//! the service, so the back-office stays reachable even when usuarios is
//! down.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::events::StoreEvent;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, NewUser};
use crate::services::Credentials;
use crate::state::AppState;

/// The in-memory administrator credentials.
const ADMIN_EMAIL: &str = "admin@tienda.com";
const ADMIN_PASSWORD: &str = "admin123";

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmarPassword")]
    pub confirmar_password: String,
}

/// Response to a successful login or registration.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub mensaje: String,
    pub usuario: CurrentUser,
}

/// Sign in.
///
/// The admin bypass is checked first; everything else is delegated to the
/// usuarios service. The service's 401 becomes a credentials message, any
/// other failure a server-side one.
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let email = request.email.trim().to_lowercase();

    if email == ADMIN_EMAIL && request.password == ADMIN_PASSWORD {
        let admin = CurrentUser::hardcoded_admin(&email);
        set_current_user(&session, &admin).await?;
        tracing::info!("hardcoded administrator signed in");
        return Ok(Json(SessionResponse {
            mensaje: "Bienvenido Administrador".to_string(),
            usuario: admin,
        }));
    }

    let credentials = Credentials {
        email,
        password: request.password,
    };
    let user = state
        .usuarios()
        .login(&credentials)
        .await
        .map_err(|e| match e.status() {
            Some(StatusCode::UNAUTHORIZED) => {
                AppError::Unauthorized("Email o contraseña incorrectos.".to_string())
            }
            _ => {
                tracing::error!(error = %e, "usuarios login failed");
                AppError::Internal(
                    "Error en el servidor al intentar iniciar sesión.".to_string(),
                )
            }
        })?;

    let current = CurrentUser::from(user);
    set_current_user(&session, &current).await?;

    Ok(Json(SessionResponse {
        mensaje: format!("Bienvenido {}", current.nombre),
        usuario: current,
    }))
}

/// Register a new account and sign it in.
///
/// The password confirmation is checked here and never sent upstream. A
/// duplicate email is reported with the service's own refusal.
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>> {
    let nombre = request.nombre.trim();
    let email = request.email.trim().to_lowercase();

    if nombre.is_empty() || email.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "Todos los campos son obligatorios.".to_string(),
        ));
    }
    if request.password != request.confirmar_password {
        return Err(AppError::BadRequest(
            "Las contraseñas no coinciden.".to_string(),
        ));
    }

    let new_user = NewUser {
        nombre: nombre.to_string(),
        email,
        password: request.password,
    };
    let user = state
        .usuarios()
        .register(&new_user)
        .await
        .map_err(|e| match e.status() {
            Some(status) if status.is_client_error() => AppError::Conflict(
                "El correo electrónico ya se encuentra registrado.".to_string(),
            ),
            _ => AppError::Service(e),
        })?;

    state
        .events()
        .publish(StoreEvent::UserCreated { user_id: user.id });

    let current = CurrentUser::from(user);
    set_current_user(&session, &current).await?;

    Ok(Json(SessionResponse {
        mensaje: "Registro exitoso. Bienvenido.".to_string(),
        usuario: current,
    }))
}

/// Sign out, discarding the whole session including any pipeline state.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
