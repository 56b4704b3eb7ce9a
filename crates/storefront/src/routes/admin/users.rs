//! Admin user management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use autotienda_core::UserId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::User;
use crate::state::AppState;

/// Response to a user mutation.
#[derive(Debug, Serialize)]
pub struct UserSaved {
    pub mensaje: String,
}

/// List all registered users.
///
/// The hardcoded administrator never appears: it has no upstream record.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<Vec<User>>> {
    let RequireAdmin(_) = admin;
    Ok(Json(state.usuarios().list().await?))
}

/// Replace a user record.
#[instrument(skip(state, admin, user))]
pub async fn update(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<UserId>,
    Json(user): Json<User>,
) -> Result<Json<UserSaved>> {
    let RequireAdmin(_) = admin;

    if id == UserId::ADMIN {
        return Err(AppError::BadRequest(
            "El administrador no tiene registro editable.".to_string(),
        ));
    }

    state.usuarios().update(id, &user).await?;

    Ok(Json(UserSaved {
        mensaje: "Usuario actualizado correctamente.".to_string(),
    }))
}

/// Delete a user.
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<Json<UserSaved>> {
    let RequireAdmin(_) = admin;

    if id == UserId::ADMIN {
        return Err(AppError::BadRequest(
            "El administrador no tiene registro editable.".to_string(),
        ));
    }

    state.usuarios().delete(id).await?;

    Ok(Json(UserSaved {
        mensaje: "Usuario eliminado correctamente.".to_string(),
    }))
}
