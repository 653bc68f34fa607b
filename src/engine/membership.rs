//! Membership search: which portfolios hold a given stock

use futures::StreamExt;
use tracing::warn;

use crate::upstream::{Portfolio, UpstreamClient, UpstreamError};

/// Check one portfolio, yielding its name when it holds the stock.
///
/// A failed fetch excludes the portfolio rather than defaulting it:
/// membership is a yes/no predicate with no safe "unknown" answer.
pub(super) async fn check_portfolio<C: UpstreamClient>(
    client: &C,
    portfolio: &Portfolio,
    stock_id: &str,
) -> Option<String> {
    match holds_stock(client, &portfolio.name, stock_id).await {
        Ok(true) => Some(portfolio.name.clone()),
        Ok(false) => None,
        Err(e) => {
            warn!(
                "Excluding portfolio '{}' from stock search: {}",
                portfolio.name, e
            );
            None
        }
    }
}

async fn holds_stock<C: UpstreamClient>(
    client: &C,
    portfolio_name: &str,
    stock_id: &str,
) -> Result<bool, UpstreamError> {
    let mut holdings = client.holdings(portfolio_name).await?;
    while let Some(holding) = holdings.next().await {
        if holding?.matches(stock_id) {
            // First match decides; the rest of the stream is dropped.
            return Ok(true);
        }
    }
    Ok(false)
}
