//! HTTP route handlers for the storefront gateway.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Catalog
//! GET  /catalog                    - Product grid with category filters
//! POST /catalog/{id}/add           - Add a product to the signed-in user's cart
//!
//! # Cart
//! GET    /cart                     - Joined cart view with recomputed total
//! PUT    /cart/lines/{id}          - Update a line's quantity
//! DELETE /cart/lines/{id}          - Remove a line
//! POST   /cart/checkout            - Snapshot the cart and advance to checkout
//!
//! # Checkout pipeline
//! GET  /checkout                   - Prefilled delivery form
//! POST /checkout                   - Validate and store the delivery form
//! GET  /receipt                    - Receipt document (redirects home if empty)
//! POST /receipt/confirm            - Submit the order and clear the cart
//!
//! # Auth
//! POST /auth/login                 - Login (with the hardcoded admin bypass)
//! POST /auth/register              - Register and auto-login
//! POST /auth/logout                - Logout
//!
//! # Contact
//! POST /contact                    - Store a contact message
//!
//! # Admin (requires ADMIN role)
//! GET    /admin/dashboard          - Aggregated store statistics
//! GET    /admin/products           - Full product collection
//! POST   /admin/products           - Create a product
//! PUT    /admin/products/{id}      - Update a product
//! DELETE /admin/products/{id}      - Delete a product
//! GET    /admin/categories         - Category list
//! POST   /admin/categories         - Register a category
//! DELETE /admin/categories/{name}  - Remove a registered category
//! GET    /admin/users              - User collection
//! PUT    /admin/users/{id}         - Update a user
//! DELETE /admin/users/{id}         - Delete a user
//! GET    /admin/orders             - Order collection
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod receipt;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/{id}/add", post(catalog::add_to_cart))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route(
            "/lines/{id}",
            put(cart::update_quantity).delete(cart::remove_line),
        )
        .route("/checkout", post(cart::begin_checkout))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard::show))
        .route(
            "/products",
            get(admin::products::index).post(admin::products::create),
        )
        .route(
            "/products/{id}",
            put(admin::products::update).delete(admin::products::remove),
        )
        .route(
            "/categories",
            get(admin::categories::index).post(admin::categories::create),
        )
        .route("/categories/{name}", delete(admin::categories::remove))
        .route("/users", get(admin::users::index))
        .route(
            "/users/{id}",
            put(admin::users::update).delete(admin::users::remove),
        )
        .route("/orders", get(admin::orders::index))
}

/// Create all routes for the storefront gateway.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .route("/receipt", get(receipt::show))
        .route("/receipt/confirm", post(receipt::confirm))
        .nest("/auth", auth_routes())
        .route("/contact", post(contact::submit))
        .nest("/admin", admin_routes())
}

/// Build the complete application: routes, session layer, request tracing.
///
/// Shared by `main` and the integration tests.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(session_layer)
        // Browser clients are served from a different origin in development;
        // the session cookie needs credentials, so the origin is mirrored
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the remote services.
async fn health() -> &'static str {
    "ok"
}
