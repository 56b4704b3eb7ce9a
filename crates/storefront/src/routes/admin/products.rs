//! Admin product management.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use autotienda_core::ProductId;

use crate::error::{AppError, Result};
use crate::events::StoreEvent;
use crate::middleware::RequireAdmin;
use crate::models::{NewProduct, Product};
use crate::state::AppState;

/// Response to a product mutation.
#[derive(Debug, Serialize)]
pub struct ProductSaved {
    pub mensaje: String,
}

fn validate(product: &NewProduct) -> Result<()> {
    let mut errors = BTreeMap::new();
    if product.marca.trim().is_empty() {
        errors.insert("marca".to_string(), "La marca es obligatoria.".to_string());
    }
    if product.modelo.trim().is_empty() {
        errors.insert("modelo".to_string(), "El modelo es obligatorio.".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// List the full product collection, legacy sentinel rows included.
///
/// The back-office sees the collection as stored; only the public catalog
/// filters it.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<Vec<Product>>> {
    let RequireAdmin(_) = admin;
    Ok(Json(state.autos().list().await?))
}

/// Create a product.
#[instrument(skip(state, admin, product))]
pub async fn create(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Json(product): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductSaved>)> {
    let RequireAdmin(_) = admin;
    validate(&product)?;

    state.autos().create(&product).await?;
    state.events().publish(StoreEvent::ProductsChanged);

    Ok((
        StatusCode::CREATED,
        Json(ProductSaved {
            mensaje: "Producto creado correctamente.".to_string(),
        }),
    ))
}

/// Replace a product.
#[instrument(skip(state, admin, product))]
pub async fn update(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<ProductId>,
    Json(product): Json<NewProduct>,
) -> Result<Json<ProductSaved>> {
    let RequireAdmin(_) = admin;
    validate(&product)?;

    state.autos().update(id, &product).await?;
    state.events().publish(StoreEvent::ProductsChanged);

    Ok(Json(ProductSaved {
        mensaje: "Producto actualizado correctamente.".to_string(),
    }))
}

/// Delete a product.
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductSaved>> {
    let RequireAdmin(_) = admin;

    state.autos().delete(id).await?;
    state.events().publish(StoreEvent::ProductsChanged);

    Ok(Json(ProductSaved {
        mensaje: "Producto eliminado correctamente.".to_string(),
    }))
}
