pub mod config;
pub mod engine;
pub mod logging;
pub mod server;
pub mod upstream;

pub use engine::AggregationEngine;
pub use upstream::{HttpUpstreamClient, UpstreamClient};
