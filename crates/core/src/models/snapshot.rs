use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::price::PricePoint;

/// Static metadata for one listed company.
///
/// Every field is optional upstream; an absent field deserializes to an
/// empty string and views substitute their own fallbacks (ticker symbol
/// for the name, "N/A" for sector/industry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub sector: String,

    #[serde(default)]
    pub industry: String,
}

/// Price history plus metadata for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerData {
    /// Daily OHLCV bars, ascending by date
    #[serde(default)]
    pub history: Vec<PricePoint>,

    #[serde(default)]
    pub info: TickerInfo,
}

/// Allocation of the portfolio to one ticker, as computed upstream.
///
/// `percentage` values across all tickers sum to ~100, but that is the
/// data service's invariant; it is trusted, not re-validated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    /// Current market value of this holding
    #[serde(default)]
    pub value: f64,

    /// Number of shares held
    #[serde(default)]
    pub shares: f64,

    #[serde(default)]
    pub current_price: f64,

    /// Price at which the equal-weight position was entered
    #[serde(default)]
    pub initial_price: f64,

    /// Share of total portfolio value, in percent
    #[serde(default)]
    pub percentage: f64,
}

/// Aggregate portfolio statistics, pre-computed by the data service.
///
/// Volatility, Sharpe ratio, and allocation are an opaque upstream
/// contract — the core formats and presents them, nothing more.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    #[serde(default)]
    pub total_value: f64,

    #[serde(default)]
    pub initial_value: f64,

    /// Overall return in percent
    #[serde(default)]
    pub total_return: f64,

    /// Annualized standard deviation, in percent
    #[serde(default)]
    pub volatility: f64,

    #[serde(default)]
    pub sharpe_ratio: f64,

    /// Per-ticker allocation breakdown
    #[serde(default)]
    pub asset_allocation: HashMap<String, AllocationEntry>,

    /// Per-ticker return in percent
    #[serde(default)]
    pub stock_returns: HashMap<String, f64>,
}

/// The full payload of one successful portfolio-data fetch.
///
/// Created once per fetch, held read-only for the session, and replaced
/// wholesale on retry. There is no incremental merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Per-ticker history and metadata, keyed by ticker symbol
    #[serde(default)]
    pub data: HashMap<String, TickerData>,

    #[serde(default)]
    pub metrics: PortfolioMetrics,

    /// Ticker symbols in upstream display order
    #[serde(default)]
    pub tickers: Vec<String>,
}

impl PortfolioSnapshot {
    /// Look up one ticker's history and metadata.
    #[must_use]
    pub fn ticker_data(&self, ticker: &str) -> Option<&TickerData> {
        self.data.get(ticker)
    }

    /// First ticker of the upstream ordering that is actually present in
    /// `data` — the default selection after a fetch.
    #[must_use]
    pub fn first_ticker(&self) -> Option<&str> {
        self.tickers
            .iter()
            .find(|t| self.data.contains_key(t.as_str()))
            .map(String::as_str)
    }
}
