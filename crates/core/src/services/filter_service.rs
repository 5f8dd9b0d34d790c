use chrono::{Months, NaiveDate};

use crate::models::price::{PerformancePoint, PricePoint};
use crate::models::selection::TimeRange;

/// Restricts date-ordered series to a trailing calendar window.
///
/// Pure slicing: the stored series is never copied or mutated; the
/// result borrows a contiguous suffix of the input.
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    /// The suffix of `history` whose dates fall on or after the cutoff
    /// for `range`, evaluated at `today`.
    ///
    /// `All` returns the input unchanged. A window narrower than the
    /// series' span yields an empty slice; callers render an empty chart
    /// region rather than treating that as an error.
    #[must_use]
    pub fn filter<'a>(
        &self,
        history: &'a [PricePoint],
        range: TimeRange,
        today: NaiveDate,
    ) -> &'a [PricePoint] {
        match cutoff(range, today) {
            Some(cutoff) => {
                // History is sorted ascending, so the window is the suffix
                // starting at the first point >= cutoff (O(log n)).
                let start = history.partition_point(|p| p.date < cutoff);
                &history[start..]
            }
            None => history,
        }
    }

    /// Same contract over the aggregate portfolio value series.
    #[must_use]
    pub fn filter_performance<'a>(
        &self,
        performance: &'a [PerformancePoint],
        range: TimeRange,
        today: NaiveDate,
    ) -> &'a [PerformancePoint] {
        match cutoff(range, today) {
            Some(cutoff) => {
                let start = performance.partition_point(|p| p.date < cutoff);
                &performance[start..]
            }
            None => performance,
        }
    }
}

/// Calendar-aware cutoff date for a range, or `None` when the whole
/// series is requested (or the subtraction is not representable).
///
/// Month arithmetic clamps end-of-month days: Mar 31 minus one month is
/// Feb 28 (29 in leap years), not a fixed 30-day offset.
fn cutoff(range: TimeRange, today: NaiveDate) -> Option<NaiveDate> {
    let months = range.months()?;
    today.checked_sub_months(Months::new(months))
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}
