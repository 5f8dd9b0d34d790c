use serde::{Deserialize, Serialize};

use super::price::{PerformancePoint, PricePoint};
use super::selection::Selection;

// ── Sparkline geometry ──────────────────────────────────────────────

/// One command of a normalized 2D path in the 100×100 unit square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Close the region back to its starting point (fill variant only)
    Close,
}

/// A projected trend line ready for SVG-style rendering.
///
/// The core computes the geometry — the frontend just renders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparklinePath {
    pub commands: Vec<PathCommand>,
}

impl SparklinePath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Render as an SVG path attribute, e.g. `"M 0.00,100.00 L 50.00,0.00"`.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            match cmd {
                PathCommand::MoveTo { x, y } => out.push_str(&format!("M {x:.2},{y:.2}")),
                PathCommand::LineTo { x, y } => out.push_str(&format!("L {x:.2},{y:.2}")),
                PathCommand::Close => out.push('Z'),
            }
        }
        out
    }
}

// ── Change statistics ───────────────────────────────────────────────

/// Sign of a point-to-point change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Positive,
    Negative,
    Flat,
}

impl Direction {
    #[must_use]
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Direction::Positive
        } else if change < 0.0 {
            Direction::Negative
        } else {
            Direction::Flat
        }
    }

    /// Whether the gain styling applies (zero change renders as a gain,
    /// matching the `>= 0` convention of the display layer).
    #[must_use]
    pub fn is_gain(&self) -> bool {
        !matches!(self, Direction::Negative)
    }
}

/// Result of a percentage computation whose denominator may be zero.
///
/// Division is wrapped here so a zero base yields a tagged `Undefined`
/// instead of a NaN/infinity leaking into formatted output. Callers
/// pattern-match on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PercentChange {
    Value(f64),
    Undefined,
}

impl PercentChange {
    /// `(change / base) * 100`, or `Undefined` when `base` is zero.
    #[must_use]
    pub fn from_parts(change: f64, base: f64) -> Self {
        if base == 0.0 {
            PercentChange::Undefined
        } else {
            PercentChange::Value((change / base) * 100.0)
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            PercentChange::Value(v) => Some(*v),
            PercentChange::Undefined => None,
        }
    }

    #[must_use]
    pub fn is_defined(&self) -> bool {
        matches!(self, PercentChange::Value(_))
    }
}

impl std::fmt::Display for PercentChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercentChange::Value(v) => write!(f, "{v:.2}%"),
            PercentChange::Undefined => write!(f, "N/A"),
        }
    }
}

/// First-to-last change statistics over one ordered value series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesDelta {
    pub first: f64,
    pub last: f64,

    /// `last - first`
    pub absolute_change: f64,

    /// `(absolute_change / first) * 100`, tagged undefined on zero base
    pub percent_change: PercentChange,

    pub direction: Direction,
}

// ── Tooltip rows ────────────────────────────────────────────────────

/// One formatted label/value pair of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
}

impl TooltipRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

// ── Widget view models ──────────────────────────────────────────────
//
// Plain data handed to presentation widgets. No logic lives past this
// point; anything a widget shows is already computed and formatted.

/// The main chart for the selected ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockChartView {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub industry: String,

    /// Range-filtered history; may be empty (renders an empty chart region)
    pub points: Vec<PricePoint>,

    /// Close-price change over the filtered window; `None` when empty
    pub delta: Option<SeriesDelta>,

    /// Latest close in the window, e.g. `"$101.50"` (`"$0.00"` when empty)
    pub price_label: String,

    /// Signed change summary, e.g. `"+$5.00 (+50.00%)"`; empty when no data
    pub change_label: String,
}

/// One holding card in the portfolio grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockCardView {
    pub ticker: String,
    pub name: String,
    pub sector: String,

    /// Trend line over the last 30 closes
    pub sparkline: SparklinePath,

    /// Closed-region variant of the same path, for gradient fill
    pub sparkline_fill: SparklinePath,

    /// Entry-to-current price change from the allocation entry
    pub change: PercentChange,
    pub direction: Direction,
    pub change_label: String,

    pub price_label: String,
    pub value_label: String,
    pub weight_label: String,

    pub selected: bool,
}

/// One bar of the per-stock return comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnBarView {
    pub ticker: String,

    /// Raw return in percent (uncapped)
    pub return_pct: f64,

    /// Bar width in percent, clamped to 100 (a display bound only)
    pub bar_width: f64,

    pub direction: Direction,

    /// Signed label, e.g. `"+12.50%"`
    pub label: String,
}

/// The headline metrics panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsPanelView {
    pub total_value_label: String,
    pub initial_value_label: String,

    pub total_return_label: String,
    pub total_return_direction: Direction,

    /// Absolute profit or loss, e.g. `"$12,345.67"`
    pub profit_loss_label: String,

    pub volatility_label: String,
    pub sharpe_label: String,

    pub return_bars: Vec<ReturnBarView>,
}

/// One slice of the asset-allocation breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSliceView {
    pub ticker: String,

    /// Raw numbers for pie geometry
    pub value: f64,
    pub percentage: f64,

    pub value_label: String,
    pub percentage_label: String,
    pub shares_label: String,
    pub price_label: String,
    pub entry_label: String,
}

/// The aggregate portfolio value chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceView {
    pub points: Vec<PerformancePoint>,

    pub delta: SeriesDelta,

    pub initial_label: String,
    pub current_label: String,

    /// Signed gain summary, e.g. `"+$23,456.00 (+23.46%)"`
    pub gain_label: String,
}

/// Everything the dashboard renders, derived in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// The selection state this view was derived from
    pub selection: Selection,

    pub stock_chart: Option<StockChartView>,
    pub cards: Vec<StockCardView>,
    pub metrics: MetricsPanelView,
    pub allocation: Vec<AllocationSliceView>,
    pub performance: Option<PerformanceView>,
}
