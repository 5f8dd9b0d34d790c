use serde::{Deserialize, Serialize};

/// How the main price chart renders the selected ticker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartType {
    /// Filled close-price area (default)
    #[default]
    Area,
    /// Close price plus volume overlay
    Line,
    /// Full OHLC rendering
    Candlestick,
}

impl ChartType {
    /// Parse a UI label ("area", "line", "candlestick", any case).
    /// Unrecognized labels fall back to `Area`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "line" => ChartType::Line,
            "candlestick" => ChartType::Candlestick,
            _ => ChartType::Area,
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartType::Area => write!(f, "area"),
            ChartType::Line => write!(f, "line"),
            ChartType::Candlestick => write!(f, "candlestick"),
        }
    }
}

/// Trailing calendar window used to truncate a series for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    OneMonth,
    ThreeMonths,
    OneYear,
    FiveYears,
    /// Entire available history (default)
    #[default]
    All,
}

impl TimeRange {
    /// Parse a UI label ("1M", "3M", "1Y", "5Y", any case).
    /// Unrecognized labels are treated as `All`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "1M" => TimeRange::OneMonth,
            "3M" => TimeRange::ThreeMonths,
            "1Y" => TimeRange::OneYear,
            "5Y" => TimeRange::FiveYears,
            _ => TimeRange::All,
        }
    }

    /// The window length in calendar months, or `None` for `All`.
    #[must_use]
    pub fn months(&self) -> Option<u32> {
        match self {
            TimeRange::OneMonth => Some(1),
            TimeRange::ThreeMonths => Some(3),
            TimeRange::OneYear => Some(12),
            TimeRange::FiveYears => Some(60),
            TimeRange::All => None,
        }
    }

    /// The label shown on the range selector buttons.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::OneYear => "1Y",
            TimeRange::FiveYears => "5Y",
            TimeRange::All => "ALL",
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The interactive presentation state owned by the view.
///
/// Mutable and UI-local; every other input to view derivation is
/// immutable snapshot data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Currently highlighted ticker. When `Some`, always a key of the
    /// snapshot's `data` map.
    pub ticker: Option<String>,

    pub chart_type: ChartType,

    pub time_range: TimeRange,
}
