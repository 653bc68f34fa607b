//! HTTP boundary for the aggregation engine
//!
//! Thin axum adapter: route the two query endpoints plus a liveness probe,
//! translate engine results straight into JSON. The engine's operations are
//! infallible by contract, so the handlers never map domain errors to
//! statuses.

mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::engine::AggregationEngine;
use crate::upstream::HttpUpstreamClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AggregationEngine<HttpUpstreamClient>>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::liveness))
        .route("/portfolios/stock/{stock_id}", get(routes::portfolios_by_stock))
        .route(
            "/portfolios/portfolio-cash-fraction",
            get(routes::cash_fractions),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
