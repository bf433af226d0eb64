//! HTTP surface
//!
//! All dataset endpoints live under [`API_PREFIX`] and answer `GET` with JSON
//! on success. Failures are plain text: 400 for a missing month, 500 with an
//! `"<operation>: <message>"` body for everything else.

pub mod error;
pub mod handlers;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use error::{ApiError, ApiResult, Operation};

pub const API_PREFIX: &str = "/api/products";

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/initialize", get(handlers::initialize))
        .route("/list", get(handlers::list_transactions))
        .route("/search", get(handlers::search_transactions))
        .route("/statistics", get(handlers::statistics))
        .route("/barchart", get(handlers::bar_chart))
        .route("/piechart", get(handlers::pie_chart))
        .route("/combinedapi", get(handlers::combined));

    Router::new()
        .route("/health", get(handlers::healthcheck))
        .nest(API_PREFIX, api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Allow any origin, for browser dashboards served from elsewhere.
pub fn with_cors(router: Router) -> Router {
    router.layer(CorsLayer::permissive())
}
