use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single OHLCV bar in a ticker's daily price history.
///
/// Series are ordered ascending by date with no duplicate dates, and are
/// immutable once received from the data service. Numeric fields default to
/// zero when the upstream payload omits them, so a sparse bar deserializes
/// instead of faulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,

    #[serde(default)]
    pub open: f64,

    #[serde(default)]
    pub high: f64,

    #[serde(default)]
    pub low: f64,

    #[serde(default)]
    pub close: f64,

    #[serde(default)]
    pub volume: f64,
}

/// One valuation of the whole portfolio on a single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub date: NaiveDate,

    #[serde(default)]
    pub value: f64,
}
