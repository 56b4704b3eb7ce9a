//! Admin dashboard aggregation.
//!
//! The dashboard pulls from all three remote collections at once. A
//! collection that cannot be fetched degrades its own panel to zero
//! instead of failing the whole page; the gap is logged.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use autotienda_core::Price;

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::ContactMessage;
use crate::state::AppState;

/// Aggregated store statistics.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub total_ordenes: usize,
    pub ingresos: Price,
    pub ingresos_display: String,
    pub total_productos: usize,
    pub inventario: i64,
    pub total_usuarios: usize,
    pub mensajes_contacto: Vec<ContactMessage>,
}

/// Show the dashboard.
#[instrument(skip(state, admin))]
pub async fn show(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<DashboardView>> {
    let RequireAdmin(_) = admin;

    let (ordenes, productos, usuarios) = tokio::join!(
        state.ordenes().list(),
        state.autos().list(),
        state.usuarios().list(),
    );

    let ordenes = ordenes.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dashboard: orders unavailable");
        Vec::new()
    });
    let productos = productos.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dashboard: products unavailable");
        Vec::new()
    });
    let usuarios = usuarios.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dashboard: users unavailable");
        Vec::new()
    });

    let ingresos: Price = ordenes.iter().map(|o| o.total).sum();
    let inventario: i64 = productos
        .iter()
        .filter(|p| p.is_displayable())
        .map(|p| p.stock)
        .sum();

    Ok(Json(DashboardView {
        total_ordenes: ordenes.len(),
        ingresos_display: ingresos.format_clp(),
        ingresos,
        total_productos: productos.iter().filter(|p| p.is_displayable()).count(),
        inventario,
        total_usuarios: usuarios.len(),
        mensajes_contacto: state.contact_messages(),
    }))
}
