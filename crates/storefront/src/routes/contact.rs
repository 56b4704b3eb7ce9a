//! Contact form route handler.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use autotienda_core::Email;

use crate::error::{AppError, Result};
use crate::models::NewContactMessage;
use crate::state::AppState;

/// Response to an accepted contact message.
#[derive(Debug, Serialize)]
pub struct ContactAccepted {
    pub mensaje: String,
}

/// Store a contact message.
///
/// Messages are kept in the gateway's in-process log; no remote service
/// holds them. The admin dashboard reads the same log for its report.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<NewContactMessage>,
) -> Result<Json<ContactAccepted>> {
    let mut errors = BTreeMap::new();
    if form.name.trim().is_empty() {
        errors.insert("name".to_string(), "El nombre es obligatorio.".to_string());
    }
    if form.message.trim().is_empty() {
        errors.insert("message".to_string(), "El mensaje es obligatorio.".to_string());
    }
    if Email::parse(&form.email).is_err() {
        errors.insert("email".to_string(), "El correo no es válido.".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let stored = state.push_contact_message(NewContactMessage {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        message: form.message.trim().to_string(),
    });
    tracing::info!(fecha = %stored.fecha, "contact message stored");

    Ok(Json(ContactAccepted {
        mensaje: "Mensaje enviado correctamente. Te contactaremos pronto.".to_string(),
    }))
}
