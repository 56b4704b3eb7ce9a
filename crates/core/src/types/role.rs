//! User role enum.

use serde::{Deserialize, Serialize};

/// Role of a signed-in user.
///
/// Maps to the usuarios service's `rol` values (`"USER"` / `"ADMIN"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Whether this role grants access to the admin back-office.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}
