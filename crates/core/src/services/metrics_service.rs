use crate::models::price::{PerformancePoint, PricePoint};
use crate::models::snapshot::AllocationEntry;
use crate::models::view::{Direction, PercentChange, SeriesDelta};

/// Maximum bar width of the per-stock return comparison, in percent.
/// A display clamp only; the underlying return is not bounded.
const BAR_WIDTH_CAP: f64 = 100.0;

/// Computes point-to-point and series-level change statistics.
///
/// All percentages go through [`PercentChange`], so a zero base is a
/// tagged `Undefined` rather than a NaN or infinity.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// First-to-last change over an ordered value series.
    /// Returns `None` for an empty series.
    #[must_use]
    pub fn series_delta(&self, values: &[f64]) -> Option<SeriesDelta> {
        let first = *values.first()?;
        let last = *values.last()?;
        let absolute_change = last - first;

        Some(SeriesDelta {
            first,
            last,
            absolute_change,
            percent_change: PercentChange::from_parts(absolute_change, first),
            direction: Direction::from_change(absolute_change),
        })
    }

    /// Change of closing prices over a (possibly range-filtered) history.
    #[must_use]
    pub fn close_delta(&self, history: &[PricePoint]) -> Option<SeriesDelta> {
        let closes: Vec<f64> = history.iter().map(|p| p.close).collect();
        self.series_delta(&closes)
    }

    /// Change of aggregate portfolio value over a performance series.
    #[must_use]
    pub fn value_delta(&self, performance: &[PerformancePoint]) -> Option<SeriesDelta> {
        let values: Vec<f64> = performance.iter().map(|p| p.value).collect();
        self.series_delta(&values)
    }

    /// Entry-to-current price change for one holding card.
    #[must_use]
    pub fn price_change(&self, allocation: &AllocationEntry) -> SeriesDelta {
        let absolute_change = allocation.current_price - allocation.initial_price;
        SeriesDelta {
            first: allocation.initial_price,
            last: allocation.current_price,
            absolute_change,
            percent_change: PercentChange::from_parts(absolute_change, allocation.initial_price),
            direction: Direction::from_change(absolute_change),
        }
    }

    /// Visual width of a return bar: `min(|percent|, 100)`.
    #[must_use]
    pub fn bar_width(&self, percent: f64) -> f64 {
        percent.abs().min(BAR_WIDTH_CAP)
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
