//! Domain models for the storefront gateway.
//!
//! The wire shapes belong to the four remote services, so the serde names
//! stay as the services spell them (`marca`, `autoId`, `cantidad`, ...).

pub mod cart;
pub mod contact;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{CartItem, CartLine, CartView, NewCartLine, UpdateCantidad};
pub use contact::{ContactMessage, NewContactMessage};
pub use order::{DeliveryInfo, NewOrder, Order, OrderItem};
pub use product::{NewProduct, Product};
pub use session::{CurrentUser, session_keys};
pub use user::{NewUser, User};
