//! Cart route handlers.
//!
//! The cart view is a join of two remote collections: the user's cart lines
//! and the catalog products they reference. The join runs on every request;
//! nothing about it is cached.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use autotienda_core::{LineId, Price, UserId};

use crate::error::{AppError, Result};
use crate::events::StoreEvent;
use crate::middleware::RequireAuth;
use crate::models::{CartItem, CartView, session_keys};
use crate::state::AppState;

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub cantidad: u32,
}

/// Response to the checkout hand-off.
#[derive(Debug, Serialize)]
pub struct BeginCheckoutResponse {
    pub siguiente: &'static str,
    pub total: Price,
    pub total_display: String,
}

/// Fetch and join the user's cart.
///
/// The per-line product lookups are all issued at once; a line whose lookup
/// fails (missing product, upstream error) is dropped from the view with a
/// warning rather than surfacing a partial record. It is not retried and
/// not reported to the user.
async fn load_cart(state: &AppState, user_id: UserId) -> Result<CartView> {
    let lines = state.carrito().lines_for_user(user_id).await?;

    let lookups = lines.iter().map(|line| state.autos().get(line.auto_id));
    let products = futures::future::join_all(lookups).await;

    let items: Vec<CartItem> = lines
        .iter()
        .zip(products)
        .filter_map(|(line, product)| match product {
            Ok(product) => Some(CartItem::join(line, &product)),
            Err(e) => {
                tracing::warn!(
                    auto_id = %line.auto_id,
                    line_id = %line.id,
                    error = %e,
                    "cart line dropped: product lookup failed"
                );
                None
            }
        })
        .collect();

    Ok(CartView::from_items(items))
}

/// Display the signed-in user's cart.
#[instrument(skip(state, auth))]
pub async fn show(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<CartView>> {
    let RequireAuth(user) = auth;
    Ok(Json(load_cart(&state, user.id).await?))
}

/// Update a line's quantity.
///
/// A quantity below 1 is rejected before any request is sent upstream (a
/// non-numeric one never deserializes). Only server-confirmed state is
/// returned: the upstream update runs first and the cart is re-fetched
/// afterwards.
#[instrument(skip(state, auth))]
pub async fn update_quantity(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(line_id): Path<LineId>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    let RequireAuth(user) = auth;

    if request.cantidad == 0 {
        return Err(AppError::BadRequest(
            "La cantidad debe ser al menos 1.".to_string(),
        ));
    }

    state
        .carrito()
        .update_quantity(line_id, request.cantidad)
        .await?;

    state.events().publish(StoreEvent::CartChanged { user_id: user.id });

    Ok(Json(load_cart(&state, user.id).await?))
}

/// Remove a line from the cart.
///
/// Local state only changes after the service confirms the deletion; on
/// failure the line stays in the cart and the error is surfaced.
#[instrument(skip(state, auth))]
pub async fn remove_line(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(line_id): Path<LineId>,
) -> Result<Json<CartView>> {
    let RequireAuth(user) = auth;

    state
        .carrito()
        .remove_line(line_id)
        .await
        .map_err(|e| match e {
            crate::services::ServiceError::NotFound => AppError::NotFound(
                "No se pudo eliminar el ítem del carrito.".to_string(),
            ),
            other => AppError::Service(other),
        })?;

    state.events().publish(StoreEvent::CartChanged { user_id: user.id });

    Ok(Json(load_cart(&state, user.id).await?))
}

/// Snapshot the cart into the session and advance to checkout.
///
/// The pay action is suspended for an empty cart.
#[instrument(skip(state, auth, session))]
pub async fn begin_checkout(
    State(state): State<AppState>,
    auth: RequireAuth,
    session: Session,
) -> Result<Json<BeginCheckoutResponse>> {
    let RequireAuth(user) = auth;

    let cart = load_cart(&state, user.id).await?;
    if !cart.can_pay() {
        return Err(AppError::Conflict("Tu carrito está vacío.".to_string()));
    }

    session
        .insert(session_keys::CART_SNAPSHOT, &cart.items)
        .await?;
    session.insert(session_keys::CART_TOTAL, cart.total).await?;

    Ok(Json(BeginCheckoutResponse {
        siguiente: "/checkout",
        total: cart.total,
        total_display: cart.total_display,
    }))
}
