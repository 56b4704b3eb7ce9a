//! Receipt route handlers.
//!
//! The receipt is the last pipeline step: it renders the snapshot one final
//! time and, on confirmation, submits the order and clears the cart. Order
//! submission is the point of no return; the order POST carries no
//! idempotency key and is never retried.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use autotienda_core::Price;

use crate::error::Result;
use crate::events::StoreEvent;
use crate::middleware::RequireAuth;
use crate::models::{CartItem, DeliveryInfo, NewOrder, session_keys};
use crate::state::AppState;

/// Receipt payload shown before confirmation.
#[derive(Debug, Serialize)]
pub struct ReceiptView {
    pub transaccion: String,
    pub fecha: String,
    pub entrega: DeliveryInfo,
    pub items: Vec<CartItem>,
    pub total: Price,
    pub total_display: String,
}

/// Response to a confirmed order.
#[derive(Debug, Serialize)]
pub struct OrderConfirmed {
    pub mensaje: String,
    pub transaccion: String,
    pub siguiente: &'static str,
}

/// Uppercase base-36 rendering of the current epoch milliseconds.
///
/// Good enough as a display reference; it is not the order's identity, the
/// ordenes service assigns that on insert.
fn transaction_reference() -> String {
    let millis = Utc::now().timestamp_millis().unsigned_abs();
    to_base36(millis)
}

/// The session's transaction reference, minted on first use.
///
/// Pinned in the session so the receipt and its confirmation report the
/// same reference; cleared with the rest of the pipeline keys.
async fn session_transaction_reference(session: &Session) -> Result<String> {
    if let Some(existing) = session
        .get::<String>(session_keys::TRANSACTION_REF)
        .await?
    {
        return Ok(existing);
    }
    let fresh = transaction_reference();
    session
        .insert(session_keys::TRANSACTION_REF, &fresh)
        .await?;
    Ok(fresh)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Read the full pipeline state, or `None` if any step was skipped.
async fn pipeline_state(
    session: &Session,
) -> Result<Option<(Vec<CartItem>, Price, DeliveryInfo)>> {
    let items: Option<Vec<CartItem>> = session.get(session_keys::CART_SNAPSHOT).await?;
    let total: Option<Price> = session.get(session_keys::CART_TOTAL).await?;
    let entrega: Option<DeliveryInfo> = session.get(session_keys::DELIVERY_INFO).await?;

    match (items, total, entrega) {
        (Some(items), Some(total), Some(entrega))
            if !items.is_empty() && !total.is_zero() =>
        {
            Ok(Some((items, total, entrega)))
        }
        _ => Ok(None),
    }
}

/// Display the receipt.
///
/// An empty snapshot or a zero total means the pipeline was entered out of
/// order (deep link, replay after purchase); the caller goes home instead
/// of seeing a blank receipt.
#[instrument(skip(_state, auth, session))]
pub async fn show(
    State(_state): State<AppState>,
    auth: RequireAuth,
    session: Session,
) -> Result<Response> {
    let RequireAuth(_) = auth;

    let Some((items, total, entrega)) = pipeline_state(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let view = ReceiptView {
        transaccion: session_transaction_reference(&session).await?,
        fecha: Utc::now().format("%d-%m-%Y").to_string(),
        entrega,
        items,
        total_display: total.format_clp(),
        total,
    };
    Ok(Json(view).into_response())
}

/// Confirm the purchase: submit the order, then clear the cart.
///
/// If order submission fails the pipeline keys are left in place so the
/// user can confirm again. After the order is accepted the cart clear is
/// attempted twice; a cart that still will not clear is logged and left
/// for manual cleanup rather than blocking the confirmation.
#[instrument(skip(state, auth, session))]
pub async fn confirm(
    State(state): State<AppState>,
    auth: RequireAuth,
    session: Session,
) -> Result<Response> {
    let RequireAuth(user) = auth;

    let Some((items, total, entrega)) = pipeline_state(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let transaccion = session_transaction_reference(&session).await?;

    let order = NewOrder::assemble(Some(user.id), &entrega, &items, total);
    if let Err(e) = state.ordenes().create(&order).await {
        tracing::error!(user_id = %user.id, error = %e, "order submission failed");
        return Ok(Redirect::to("/").into_response());
    }

    let cleared = match state.carrito().clear(user.id).await {
        Ok(()) => true,
        Err(first) => {
            tracing::warn!(user_id = %user.id, error = %first, "cart clear failed, retrying once");
            match state.carrito().clear(user.id).await {
                Ok(()) => true,
                Err(second) => {
                    tracing::error!(
                        user_id = %user.id,
                        error = %second,
                        total = %total,
                        "cart clear failed after order submission, pending cleanup"
                    );
                    false
                }
            }
        }
    };

    for key in session_keys::PIPELINE {
        session.remove::<serde_json::Value>(key).await?;
    }

    if cleared {
        state.events().publish(StoreEvent::CartChanged { user_id: user.id });
    }

    let response = OrderConfirmed {
        mensaje: "Compra realizada con éxito. Gracias por su preferencia.".to_string(),
        transaccion,
        siguiente: "/",
    };
    Ok(Json(response).into_response())
}
