//! Concurrent fan-out/fan-in aggregation over the upstream portfolio API
//!
//! Both queries follow the same shape: fetch the portfolio list once, then
//! dispatch one concurrent unit of work per portfolio and merge the partial
//! results. A failure inside one portfolio's work never aborts its siblings,
//! and a failed portfolio-list fetch degrades to an empty answer instead of
//! an error.

mod cash_fraction;
mod membership;

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{error, info};

use crate::upstream::{Portfolio, UpstreamClient};

pub struct AggregationEngine<C> {
    client: C,
}

impl<C: UpstreamClient> AggregationEngine<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Names of all portfolios holding the given stock.
    ///
    /// Portfolios are checked in parallel; each check stops at the first
    /// matching holding. A portfolio whose holdings fetch fails is excluded
    /// from the answer. Result order follows the portfolio-list order.
    pub async fn find_portfolios_holding(&self, stock_id: &str) -> Vec<String> {
        let portfolios = self.list_or_empty().await;
        let checks = portfolios
            .iter()
            .map(|p| membership::check_portfolio(&self.client, p, stock_id));

        // join_all preserves input order, which keeps the answer
        // deterministic regardless of completion order.
        join_all(checks).await.into_iter().flatten().collect()
    }

    /// Cash as a fraction of total value, for every listed portfolio.
    ///
    /// Every listed portfolio gets exactly one entry; a portfolio whose
    /// upstream calls fail contributes the default fraction 0.0.
    pub async fn cash_fractions(&self) -> HashMap<String, f64> {
        let portfolios = self.list_or_empty().await;
        let computations = portfolios
            .iter()
            .map(|p| cash_fraction::portfolio_entry(&self.client, p));

        join_all(computations).await.into_iter().collect()
    }

    /// Shared absorb policy for the initial list fetch: both queries degrade
    /// to an empty result rather than surfacing the error to the caller.
    async fn list_or_empty(&self) -> Vec<Portfolio> {
        match self.client.list_portfolios().await {
            Ok(portfolios) => {
                info!("Retrieved {} portfolios", portfolios.len());
                portfolios
            }
            Err(e) => {
                error!(
                    "Failed to retrieve portfolio list, returning empty result: {}",
                    e
                );
                Vec::new()
            }
        }
    }
}
