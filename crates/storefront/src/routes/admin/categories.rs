//! Admin category management.
//!
//! Categories are first-class registry entries, not fake products. The
//! effective category set is still the union of the base list, every
//! `categoria` found in the catalog (legacy sentinel rows included) and
//! the registry, so categories created by either mechanism show up.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::categories::{ALL_CATEGORY, BASE_CATEGORIES, selectable_categories};
use crate::error::{AppError, Result};
use crate::events::StoreEvent;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Category registration request.
#[derive(Debug, Deserialize)]
pub struct NewCategory {
    pub nombre: String,
}

/// Category list payload.
#[derive(Debug, Serialize)]
pub struct CategoriesView {
    /// The effective set, as the catalog page offers it.
    pub categorias: Vec<String>,
    /// The subset registered here (the only ones that can be deleted).
    pub registradas: Vec<String>,
}

/// Response to a category mutation.
#[derive(Debug, Serialize)]
pub struct CategorySaved {
    pub mensaje: String,
}

async fn effective_categories(state: &AppState) -> Result<Vec<String>> {
    let products = state.autos().list().await?;
    Ok(selectable_categories(&products, &state.categories().all()))
}

/// List categories.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<CategoriesView>> {
    let RequireAdmin(_) = admin;
    Ok(Json(CategoriesView {
        categorias: effective_categories(&state).await?,
        registradas: state.categories().all(),
    }))
}

/// Register a category.
///
/// The duplicate check runs against the whole effective set, so a name a
/// legacy sentinel row already provides cannot be registered twice.
#[instrument(skip(state, admin, request), fields(nombre = %request.nombre))]
pub async fn create(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Json(request): Json<NewCategory>,
) -> Result<(StatusCode, Json<CategorySaved>)> {
    let RequireAdmin(_) = admin;

    let nombre = request.nombre.trim().to_string();
    if nombre.is_empty() {
        return Err(AppError::BadRequest(
            "El nombre de la categoría es obligatorio.".to_string(),
        ));
    }

    let existing = effective_categories(&state).await?;
    let duplicate = existing.iter().any(|c| c.eq_ignore_ascii_case(&nombre))
        || nombre.eq_ignore_ascii_case(ALL_CATEGORY);
    if duplicate || !state.categories().register(&nombre) {
        return Err(AppError::Conflict(format!(
            "La categoría '{nombre}' ya está registrada."
        )));
    }

    state.events().publish(StoreEvent::ProductsChanged);

    Ok((
        StatusCode::CREATED,
        Json(CategorySaved {
            mensaje: format!("Categoría '{nombre}' registrada correctamente."),
        }),
    ))
}

/// Remove a registered category.
///
/// Base categories are fixed, and a category still carried by a real
/// product cannot be removed while those products reference it.
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(name): Path<String>,
) -> Result<Json<CategorySaved>> {
    let RequireAdmin(_) = admin;

    let name = name.trim().to_string();
    let is_base = BASE_CATEGORIES
        .iter()
        .any(|b| b.eq_ignore_ascii_case(&name))
        || name.eq_ignore_ascii_case(ALL_CATEGORY);
    if is_base {
        return Err(AppError::BadRequest(
            "No puedes eliminar una categoría base.".to_string(),
        ));
    }

    let products = state.autos().list().await?;
    let in_use = products.iter().any(|p| {
        p.is_displayable()
            && p.categoria
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(&name))
    });
    if in_use {
        return Err(AppError::Conflict(format!(
            "La categoría '{name}' está en uso por productos existentes."
        )));
    }

    if !state.categories().unregister(&name) {
        return Err(AppError::NotFound(format!(
            "La categoría '{name}' no está registrada."
        )));
    }

    state.events().publish(StoreEvent::ProductsChanged);

    Ok(Json(CategorySaved {
        mensaje: format!("Categoría '{name}' eliminada correctamente."),
    }))
}
