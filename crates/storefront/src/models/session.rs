//! Session-stored types and keys.
//!
//! The legacy web client spread its workflow state across browser storage
//! keys that every page re-parsed by hand. Here every key has a declared
//! type and every read goes through serde, so a missing or malformed value
//! deserializes to `None` instead of leaking an untyped shape.

use serde::{Deserialize, Serialize};

use autotienda_core::{Role, UserId};

use super::User;

/// Session-stored identity of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub nombre: String,
    pub email: String,
    pub rol: Role,
}

impl CurrentUser {
    /// The hardcoded in-memory administrator (never persisted upstream).
    #[must_use]
    pub fn hardcoded_admin(email: &str) -> Self {
        Self {
            id: UserId::ADMIN,
            nombre: "Administrador".to_string(),
            email: email.to_string(),
            rol: Role::Admin,
        }
    }

    /// Whether this user may enter the admin back-office.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.rol.is_admin()
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nombre: user.nombre,
            email: user.email,
            rol: user.rol,
        }
    }
}

/// Session keys.
///
/// `CURRENT_USER` is the durable scope (it lives for the whole session
/// cookie lifetime); the other three are the checkout pipeline's tab-scoped
/// hand-off, cleared when the pipeline ends.
pub mod session_keys {
    /// Key for the signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the cart snapshot handed from cart to checkout.
    pub const CART_SNAPSHOT: &str = "cart_snapshot";

    /// Key for the cart total handed along with the snapshot.
    pub const CART_TOTAL: &str = "cart_total";

    /// Key for the delivery form collected at checkout.
    pub const DELIVERY_INFO: &str = "delivery_info";

    /// Key for the transaction reference shown on the receipt.
    pub const TRANSACTION_REF: &str = "transaction_ref";

    /// The pipeline keys, in clearing order.
    pub const PIPELINE: &[&str] = &[CART_SNAPSHOT, CART_TOTAL, DELIVERY_INFO, TRANSACTION_REF];
}
