//! Checkout route handlers.
//!
//! Checkout sits between the cart snapshot and the receipt. The delivery
//! form is stored verbatim in the session, so going back from the receipt
//! re-opens a prefilled form.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use autotienda_core::Price;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CartItem, DeliveryInfo, session_keys};
use crate::state::AppState;

/// Checkout page payload: the prefilled form and the snapshot being paid.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub entrega: DeliveryInfo,
    /// Form fields locked to the signed-in identity; the client renders
    /// them disabled.
    pub bloqueados: Vec<&'static str>,
    pub items: Vec<CartItem>,
    pub total: Price,
    pub total_display: String,
}

/// Response to a valid delivery form.
#[derive(Debug, Serialize)]
pub struct CheckoutAccepted {
    pub siguiente: &'static str,
}

/// Read the pipeline snapshot, if the checkout hand-off happened.
async fn pipeline_snapshot(session: &Session) -> Result<Option<(Vec<CartItem>, Price)>> {
    let items: Option<Vec<CartItem>> = session.get(session_keys::CART_SNAPSHOT).await?;
    let total: Option<Price> = session.get(session_keys::CART_TOTAL).await?;

    match (items, total) {
        (Some(items), Some(total)) if !items.is_empty() && !total.is_zero() => {
            Ok(Some((items, total)))
        }
        _ => Ok(None),
    }
}

/// Display the checkout form.
///
/// Without a cart snapshot in the session there is nothing to pay for and
/// the caller is sent back to the storefront. A form saved earlier in the
/// same session wins over the identity-derived prefill.
#[instrument(skip(_state, auth, session))]
pub async fn show(
    State(_state): State<AppState>,
    auth: RequireAuth,
    session: Session,
) -> Result<Response> {
    let RequireAuth(user) = auth;

    let Some((items, total)) = pipeline_snapshot(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let mut bloqueados = Vec::new();
    if !user.nombre.trim().is_empty() {
        bloqueados.push("nombre");
    }
    if !user.email.trim().is_empty() {
        bloqueados.push("correo");
    }

    let entrega = match session.get(session_keys::DELIVERY_INFO).await? {
        Some(saved) => saved,
        None => DeliveryInfo {
            nombre: user.nombre,
            correo: user.email,
            ..DeliveryInfo::default()
        },
    };

    let view = CheckoutView {
        entrega,
        bloqueados,
        items,
        total_display: total.format_clp(),
        total,
    };
    Ok(Json(view).into_response())
}

/// Validate and store the delivery form.
///
/// Last name, street, region and comuna are required; the other fields are
/// free-form. Validation reports every missing field at once.
#[instrument(skip(_state, auth, session, form))]
pub async fn submit(
    State(_state): State<AppState>,
    auth: RequireAuth,
    session: Session,
    Json(form): Json<DeliveryInfo>,
) -> Result<Json<CheckoutAccepted>> {
    let RequireAuth(_) = auth;

    if pipeline_snapshot(&session).await?.is_none() {
        return Err(AppError::Conflict("Tu carrito está vacío.".to_string()));
    }

    let mut errors = BTreeMap::new();
    if form.apellido.trim().is_empty() {
        errors.insert("apellido".to_string(), "El apellido es obligatorio.".to_string());
    }
    if form.calle.trim().is_empty() {
        errors.insert("calle".to_string(), "La calle es obligatoria.".to_string());
    }
    if form.region.trim().is_empty() {
        errors.insert("region".to_string(), "La región es obligatoria.".to_string());
    }
    if form.comuna.trim().is_empty() {
        errors.insert("comuna".to_string(), "La comuna es obligatoria.".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    session.insert(session_keys::DELIVERY_INFO, &form).await?;

    Ok(Json(CheckoutAccepted { siguiente: "/receipt" }))
}
