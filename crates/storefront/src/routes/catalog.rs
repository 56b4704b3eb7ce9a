//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use autotienda_core::ProductId;

use crate::categories::{ALL_CATEGORY, selectable_categories};
use crate::error::{AppError, Result};
use crate::events::StoreEvent;
use crate::middleware::OptionalAuth;
use crate::models::{NewCartLine, Product};
use crate::state::AppState;

/// Query parameters for the catalog grid.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub categoria: Option<String>,
}

/// Catalog page data.
#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub categorias: Vec<String>,
    pub categoria_seleccionada: String,
    pub productos: Vec<Product>,
}

/// Response to an add-to-cart request.
#[derive(Debug, Serialize)]
pub struct AddedResponse {
    pub mensaje: String,
}

/// Display the catalog grid.
///
/// The category filter set is derived from the *unfiltered* fetch, so a
/// legacy sentinel row can inject a filter option even though the sentinel
/// itself never reaches the grid.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogView>> {
    let all = state.autos().list().await?;

    let registered = state.categories().all();
    let categorias = selectable_categories(&all, &registered);

    let seleccionada = query
        .categoria
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| ALL_CATEGORY.to_string());

    let productos = all
        .into_iter()
        .filter(Product::is_displayable)
        .filter(|p| {
            seleccionada == ALL_CATEGORY || p.categoria.as_deref() == Some(seleccionada.as_str())
        })
        .collect();

    Ok(Json(CatalogView {
        categorias,
        categoria_seleccionada: seleccionada,
        productos,
    }))
}

/// Add one unit of a product to the signed-in user's cart.
///
/// Blocks with a message when nobody is signed in; on success broadcasts
/// the cart-changed signal so sibling views resync.
#[instrument(skip(state, auth))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<ProductId>,
) -> Result<Json<AddedResponse>> {
    let OptionalAuth(user) = auth;
    let Some(user) = user else {
        return Err(AppError::Unauthorized(
            "Debes iniciar sesión para agregar productos al carrito.".to_string(),
        ));
    };

    let producto = state.autos().get(id).await?;

    state
        .carrito()
        .add_line(&NewCartLine {
            user_id: user.id,
            auto_id: id,
            cantidad: 1,
        })
        .await?;

    state.events().publish(StoreEvent::CartChanged { user_id: user.id });

    Ok(Json(AddedResponse {
        mensaje: format!("{} agregado al carrito.", producto.display_name()),
    }))
}
