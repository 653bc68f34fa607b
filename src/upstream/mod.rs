//! Upstream portfolio-data API integration
//!
//! This module provides typed access to the remote portfolio-data service:
//! the portfolio list, per-portfolio holdings, and per-portfolio cash.

pub mod client;
pub mod types;

pub use client::{HoldingStream, HttpUpstreamClient, UpstreamClient, UpstreamError};
pub use types::{Cash, Holding, Portfolio};
