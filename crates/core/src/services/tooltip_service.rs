use chrono::NaiveDate;

use crate::models::price::{PerformancePoint, PricePoint};
use crate::models::selection::ChartType;
use crate::models::view::{PercentChange, TooltipRow};

/// Renders data points into structured, human-readable tooltip rows,
/// conditioned on the active chart mode.
///
/// Formatting never faults: absent upstream fields were defaulted to
/// zero at deserialization, so every input maps to a defined string.
pub struct TooltipService;

impl TooltipService {
    pub fn new() -> Self {
        Self
    }

    /// Tooltip rows for one OHLCV bar.
    ///
    /// Area and line modes show close and volume; candlestick mode shows
    /// the full OHLC set plus volume.
    #[must_use]
    pub fn price_tooltip(&self, point: &PricePoint, chart_type: ChartType) -> Vec<TooltipRow> {
        match chart_type {
            ChartType::Area | ChartType::Line => vec![
                TooltipRow::new("Close", format_currency(point.close)),
                TooltipRow::new("Volume", format_volume_millions(point.volume)),
            ],
            ChartType::Candlestick => vec![
                TooltipRow::new("Open", format_currency(point.open)),
                TooltipRow::new("High", format_currency(point.high)),
                TooltipRow::new("Low", format_currency(point.low)),
                TooltipRow::new("Close", format_currency(point.close)),
                TooltipRow::new("Volume", format_volume_millions(point.volume)),
            ],
        }
    }

    /// Tooltip rows for one portfolio valuation: long-form date plus
    /// grouped currency value.
    #[must_use]
    pub fn performance_tooltip(&self, point: &PerformancePoint) -> Vec<TooltipRow> {
        vec![
            TooltipRow::new("Date", format_tooltip_date(point.date)),
            TooltipRow::new("Portfolio Value", format_currency_grouped(point.value)),
        ]
    }
}

impl Default for TooltipService {
    fn default() -> Self {
        Self::new()
    }
}

// ── Formatting contracts ────────────────────────────────────────────

/// Fixed two-decimal currency, e.g. `"$101.50"`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

/// Two-decimal currency with thousands separators, e.g. `"$1,234,567.89"`.
#[must_use]
pub fn format_currency_grouped(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}${grouped}.{frac_part}")
}

/// Volume in millions, e.g. `"2.30M"`.
#[must_use]
pub fn format_volume_millions(volume: f64) -> String {
    format!("{:.2}M", volume / 1_000_000.0)
}

/// Currency with an explicit sign, e.g. `"+$5.00"` / `"-$5.00"`.
#[must_use]
pub fn signed_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("+${value:.2}")
    }
}

/// Grouped currency with an explicit sign, e.g. `"+$23,456.00"`.
#[must_use]
pub fn signed_currency_grouped(value: f64) -> String {
    if value < 0.0 {
        format_currency_grouped(value)
    } else {
        format!("+{}", format_currency_grouped(value))
    }
}

/// Percentage with an explicit sign, e.g. `"+50.00%"`, or `"N/A"` when
/// the change is undefined.
#[must_use]
pub fn signed_percent(change: PercentChange) -> String {
    match change.value() {
        Some(v) if v < 0.0 => format!("{v:.2}%"),
        Some(v) => format!("+{v:.2}%"),
        None => "N/A".to_string(),
    }
}

/// Axis-tick date: month abbreviation plus two-digit year, e.g. `"Jan 24"`.
/// Distinct from the long tooltip form — the two must not be conflated.
#[must_use]
pub fn format_axis_date(date: NaiveDate) -> String {
    date.format("%b %y").to_string()
}

/// Tooltip date: full month name, day, and year, e.g. `"January 5, 2024"`.
#[must_use]
pub fn format_tooltip_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
