//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                    - Liveness check
//! GET   /customers/{customer_id}   - Fetch one customer
//! PATCH /customers/{customer_id}   - Partial update (id and usage are fixed)
//! POST  /customers                 - Create a customer
//! POST  /customers/                - Same, trailing slash kept for old clients
//! ```

pub mod customers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/customers/{customer_id}",
            get(customers::show).patch(customers::update),
        )
        .route("/customers", post(customers::create))
        .route("/customers/", post(customers::create))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
