//! Wire types for the upstream portfolio-data API

use serde::{Deserialize, Serialize};

/// A named portfolio as returned by `GET /portfolios`.
///
/// Identity is the name. The `is_disabled` flag is carried through for
/// completeness but neither query filters on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    #[serde(default)]
    pub is_disabled: bool,
}

/// A single position inside a portfolio, from `GET /{name}/holdings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub stock_id: String,
    pub value: f64,
}

impl Holding {
    /// Stock identifiers compare case-insensitively. The comparison is
    /// ASCII-only, which covers ticker symbols; non-ASCII identifiers would
    /// compare byte-for-byte.
    pub fn matches(&self, stock_id: &str) -> bool {
        self.stock_id.eq_ignore_ascii_case(stock_id)
    }
}

/// Cash position of a portfolio, from `GET /{name}/cash`.
///
/// The remote API reports `{"value": null}` for portfolios without a cash
/// account; that is equivalent to zero everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cash {
    #[serde(default)]
    pub value: Option<f64>,
}

impl Cash {
    pub fn amount(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}
