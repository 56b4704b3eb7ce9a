//! User models for the usuarios service.

use serde::{Deserialize, Serialize};

use autotienda_core::{Role, UserId};

/// A user as stored by the usuarios service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub rol: Role,
}

/// Registration payload. The service assigns the id and the USER role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub nombre: String,
    pub email: String,
    pub password: String,
}
