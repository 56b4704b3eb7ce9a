//! Contact form models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact form submission payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A stored contact message, read by the admin dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub fecha: DateTime<Utc>,
}

impl ContactMessage {
    /// Timestamp a submission.
    #[must_use]
    pub fn received(form: NewContactMessage, at: DateTime<Utc>) -> Self {
        Self {
            name: form.name,
            email: form.email,
            message: form.message,
            fecha: at,
        }
    }
}
