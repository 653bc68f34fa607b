//! API route handlers

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use super::AppState;

/// Liveness probe - is the server running?
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `GET /portfolios/stock/{stock_id}` — names of portfolios holding a stock.
pub async fn portfolios_by_stock(
    State(state): State<AppState>,
    Path(stock_id): Path<String>,
) -> Json<Vec<String>> {
    info!("Searching portfolios for stock: {}", stock_id);
    Json(state.engine.find_portfolios_holding(&stock_id).await)
}

/// `GET /portfolios/portfolio-cash-fraction` — cash fraction per portfolio.
pub async fn cash_fractions(State(state): State<AppState>) -> Json<HashMap<String, f64>> {
    info!("Computing cash fractions for all portfolios");
    Json(state.engine.cash_fractions().await)
}
