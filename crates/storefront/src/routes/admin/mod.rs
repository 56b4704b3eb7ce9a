//! Admin back-office route handlers.
//!
//! Every handler here takes [`RequireAdmin`](crate::middleware::RequireAdmin);
//! the routers in [`super`] nest them under `/admin`.

pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod users;
