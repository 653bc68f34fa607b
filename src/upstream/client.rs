//! Client for the remote portfolio-data API
//!
//! Every call is bound by its own timeout. A 4xx answer from the remote
//! service maps to [`UpstreamError::Rejected`]; a timeout or transport
//! failure maps to [`UpstreamError::Unavailable`]. No retries happen here.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::types::{Cash, Holding, Portfolio};

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream rejected {operation} request for {target} (status {status})")]
    Rejected {
        operation: &'static str,
        target: String,
        status: StatusCode,
    },
    #[error("upstream unavailable during {operation} request for {target}: {source}")]
    Unavailable {
        operation: &'static str,
        target: String,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    pub fn operation(&self) -> &'static str {
        match self {
            UpstreamError::Rejected { operation, .. } => operation,
            UpstreamError::Unavailable { operation, .. } => operation,
        }
    }
}

/// Lazily consumable sequence of holdings for one portfolio.
///
/// Consumers may drop the stream early; the membership query stops pulling
/// items as soon as it sees a match.
pub type HoldingStream = BoxStream<'static, Result<Holding, UpstreamError>>;

/// Read access to the remote portfolio-data service.
///
/// Abstracted behind a trait so the aggregation engine can be exercised
/// against scripted in-memory sources in tests.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Fetch the full portfolio list.
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>, UpstreamError>;

    /// Fetch the holdings of one portfolio as a consumable stream.
    async fn holdings(&self, portfolio_name: &str) -> Result<HoldingStream, UpstreamError>;

    /// Fetch the cash position of one portfolio.
    async fn cash(&self, portfolio_name: &str) -> Result<Cash, UpstreamError>;
}

/// reqwest-backed implementation of [`UpstreamClient`].
pub struct HttpUpstreamClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpUpstreamClient {
    /// The base URL must be hierarchical (http/https); config load enforces
    /// this before the client is constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }

    /// Build an endpoint URL, percent-encoding each path segment so that a
    /// portfolio name containing `/`, spaces, or `#` stays a single segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        target: &str,
        segments: &[&str],
    ) -> Result<T, UpstreamError> {
        let url = self.endpoint(segments);
        debug!("Fetching {} from {}", operation, url);

        let unavailable = |source: reqwest::Error| UpstreamError::Unavailable {
            operation,
            target: target.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if status.is_client_error() {
            return Err(UpstreamError::Rejected {
                operation,
                target: target.to_string(),
                status,
            });
        }

        // Non-4xx failures (5xx) and body/decode problems count as the
        // service being unavailable for this call.
        response
            .error_for_status()
            .map_err(unavailable)?
            .json::<T>()
            .await
            .map_err(unavailable)
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>, UpstreamError> {
        self.get_json("portfolios", "portfolios", &["portfolios"])
            .await
    }

    async fn holdings(&self, portfolio_name: &str) -> Result<HoldingStream, UpstreamError> {
        // The remote API delivers the holdings as one JSON array, so the
        // stream is materialized here; the trait still exposes a stream so
        // callers can stop consuming early.
        let holdings: Vec<Holding> = self
            .get_json("holdings", portfolio_name, &[portfolio_name, "holdings"])
            .await?;
        Ok(stream::iter(holdings.into_iter().map(Ok)).boxed())
    }

    async fn cash(&self, portfolio_name: &str) -> Result<Cash, UpstreamError> {
        self.get_json("cash", portfolio_name, &[portfolio_name, "cash"])
            .await
    }
}
