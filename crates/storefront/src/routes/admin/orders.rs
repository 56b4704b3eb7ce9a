//! Admin order listing.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use autotienda_core::Price;

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::state::AppState;

/// Order collection with its aggregate, as the back-office table shows it.
#[derive(Debug, Serialize)]
pub struct OrdersView {
    pub ordenes: Vec<Order>,
    pub total_ventas: Price,
    pub total_ventas_display: String,
}

/// List all orders.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<OrdersView>> {
    let RequireAdmin(_) = admin;

    let ordenes = state.ordenes().list().await?;
    let total_ventas: Price = ordenes.iter().map(|o| o.total).sum();

    Ok(Json(OrdersView {
        total_ventas_display: total_ventas.format_clp(),
        total_ventas,
        ordenes,
    }))
}
