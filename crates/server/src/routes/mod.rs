//! HTTP route handlers for the register server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Health check
//!
//! # Submissions
//! POST /api/submissions                - Run the pipeline for one form submission
//!
//! # Reference data (selector population)
//! GET  /api/reference/stores           - The fixed store list
//! GET  /api/reference/guards/{store_id} - Guard roster for one store
//! GET  /api/reference/skus             - All catalog SKUs
//! GET  /api/reference/catalog/{sku}    - Product/family lookup by SKU
//! GET  /api/reference/users            - Warehouse user labels
//! POST /api/reference/refresh          - Drop cached reference snapshots
//! ```

pub mod reference;
pub mod submissions;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::sheets::SheetStore;
use crate::state::AppState;

/// Create the full application router.
pub fn router<S: SheetStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/submissions", post(submissions::submit::<S>))
        .route("/api/reference/stores", get(reference::stores))
        .route(
            "/api/reference/guards/{store_id}",
            get(reference::guards::<S>),
        )
        .route("/api/reference/skus", get(reference::skus::<S>))
        .route("/api/reference/catalog/{sku}", get(reference::catalog::<S>))
        .route("/api/reference/users", get(reference::users::<S>))
        .route("/api/reference/refresh", post(reference::refresh::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> StatusCode {
    StatusCode::OK
}
