//! Cash as a fraction of total portfolio value

use futures::TryStreamExt;
use tracing::warn;

use crate::upstream::{Portfolio, UpstreamClient, UpstreamError};

/// Compute one portfolio's map entry.
///
/// An upstream failure along the way defaults the fraction to 0.0 instead of
/// dropping the key, so the merged map always covers every listed portfolio.
pub(super) async fn portfolio_entry<C: UpstreamClient>(
    client: &C,
    portfolio: &Portfolio,
) -> (String, f64) {
    match compute_fraction(client, &portfolio.name).await {
        Ok(fraction) => (portfolio.name.clone(), fraction),
        Err(e) => {
            warn!(
                "Defaulting cash fraction to 0.0 for portfolio '{}': {}",
                portfolio.name, e
            );
            (portfolio.name.clone(), 0.0)
        }
    }
}

async fn compute_fraction<C: UpstreamClient>(
    client: &C,
    portfolio_name: &str,
) -> Result<f64, UpstreamError> {
    let cash = client.cash(portfolio_name).await?.amount();

    // A zero-cash portfolio has a zero fraction regardless of what it holds,
    // so the holdings call is skipped entirely.
    if cash <= 0.0 {
        return Ok(0.0);
    }

    let holdings_value = client
        .holdings(portfolio_name)
        .await?
        .try_fold(0.0, |sum, holding| async move { Ok(sum + holding.value) })
        .await?;

    let total = cash + holdings_value;
    Ok(if total > 0.0 { cash / total } else { 0.0 })
}
