pub mod errors;
pub mod models;
pub mod services;
pub mod upstream;

use chrono::NaiveDate;

use errors::CoreError;
use models::price::{PerformancePoint, PricePoint};
use models::selection::{ChartType, Selection, TimeRange};
use models::snapshot::PortfolioSnapshot;
use models::view::{
    AllocationSliceView, DashboardView, Direction, MetricsPanelView, PercentChange,
    PerformanceView, ReturnBarView, StockCardView, StockChartView, TooltipRow,
};
use services::filter_service::FilterService;
use services::metrics_service::MetricsService;
use services::sparkline_service::SparklineService;
use services::tooltip_service::{
    format_currency, format_currency_grouped, signed_currency, signed_currency_grouped,
    signed_percent, TooltipService,
};
use upstream::traits::PortfolioDataSource;

/// Number of trailing closes behind each holding card's sparkline.
const SPARKLINE_WINDOW: usize = 30;

/// Main entry point for the Market Terminal core library.
///
/// Owns the immutable snapshot/performance data and the interactive
/// selection state, and derives all widget view-models from them. Every
/// state transition is a pure replacement; every derivation is a pure
/// function of `(snapshot, performance, selection, date)`, so identical
/// inputs always yield identical output.
#[must_use]
pub struct MarketTerminal {
    snapshot: PortfolioSnapshot,
    performance: Vec<PerformancePoint>,
    selection: Selection,
    filter_service: FilterService,
    sparkline_service: SparklineService,
    metrics_service: MetricsService,
    tooltip_service: TooltipService,
}

impl std::fmt::Debug for MarketTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketTerminal")
            .field("tickers", &self.snapshot.tickers.len())
            .field("performance_points", &self.performance.len())
            .field("selection", &self.selection)
            .finish()
    }
}

impl MarketTerminal {
    /// Build the dashboard state from already-fetched payloads.
    ///
    /// Initial selection: the snapshot's first ticker, area chart, full
    /// history.
    pub fn new(snapshot: PortfolioSnapshot, performance: Vec<PerformancePoint>) -> Self {
        let selection = Selection {
            ticker: snapshot.first_ticker().map(str::to_string),
            chart_type: ChartType::default(),
            time_range: TimeRange::default(),
        };

        Self {
            snapshot,
            performance,
            selection,
            filter_service: FilterService::new(),
            sparkline_service: SparklineService::new(),
            metrics_service: MetricsService::new(),
            tooltip_service: TooltipService::new(),
        }
    }

    /// Pull both payloads from a data source and build the dashboard.
    pub async fn fetch(source: &dyn PortfolioDataSource) -> Result<Self, CoreError> {
        let snapshot = source.fetch_snapshot().await?;
        let performance = source.fetch_performance().await?;
        log::debug!("initial fetch from {} complete", source.name());
        Ok(Self::new(snapshot, performance))
    }

    /// Re-fetch both payloads and replace all state wholesale.
    ///
    /// Nothing is touched until both fetches succeed — a failed retry
    /// leaves the previous dashboard intact for the shell to keep showing.
    pub async fn refresh(&mut self, source: &dyn PortfolioDataSource) -> Result<(), CoreError> {
        let snapshot = source.fetch_snapshot().await?;
        let performance = source.fetch_performance().await?;
        log::debug!("refresh from {} complete", source.name());
        self.replace_data(snapshot, performance);
        Ok(())
    }

    // ── State Transitions ───────────────────────────────────────────

    /// Highlight a ticker. Selecting a symbol that is not present in the
    /// snapshot is a no-op, not an error.
    pub fn select_ticker(&mut self, ticker: &str) {
        if self.snapshot.data.contains_key(ticker) {
            self.selection.ticker = Some(ticker.to_string());
        } else {
            log::debug!("ignoring selection of unknown ticker {ticker}");
        }
    }

    /// Switch the main chart rendering mode.
    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.selection.chart_type = chart_type;
    }

    /// Switch the trailing display window of the main chart.
    pub fn set_time_range(&mut self, time_range: TimeRange) {
        self.selection.time_range = time_range;
    }

    /// Replace snapshot and performance data wholesale (e.g. after a
    /// successful retry) and reset the selection to the new initial state.
    /// There is no incremental merge; prior state is discarded entirely.
    pub fn replace_data(
        &mut self,
        snapshot: PortfolioSnapshot,
        performance: Vec<PerformancePoint>,
    ) {
        log::debug!(
            "replacing dashboard data: {} tickers, {} performance points",
            snapshot.tickers.len(),
            performance.len()
        );
        self.selection = Selection {
            ticker: snapshot.first_ticker().map(str::to_string),
            chart_type: ChartType::default(),
            time_range: TimeRange::default(),
        };
        self.snapshot = snapshot;
        self.performance = performance;
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn performance(&self) -> &[PerformancePoint] {
        &self.performance
    }

    // ── View Derivation ─────────────────────────────────────────────

    /// Derive the full dashboard view-model, evaluating trailing windows
    /// against `today`. Synchronous and idempotent: identical state and
    /// date always produce an equal view.
    #[must_use]
    pub fn dashboard_at(&self, today: NaiveDate) -> DashboardView {
        DashboardView {
            selection: self.selection.clone(),
            stock_chart: self.stock_chart(today),
            cards: self.cards(),
            metrics: self.metrics_panel(),
            allocation: self.allocation(),
            performance: self.performance_view(),
        }
    }

    /// Convenience wrapper over [`Self::dashboard_at`] using today's date.
    #[must_use]
    pub fn dashboard(&self) -> DashboardView {
        self.dashboard_at(chrono::Utc::now().date_naive())
    }

    /// Tooltip rows for a bar of the main chart, conditioned on the
    /// currently selected chart type.
    #[must_use]
    pub fn price_tooltip(&self, point: &PricePoint) -> Vec<TooltipRow> {
        self.tooltip_service
            .price_tooltip(point, self.selection.chart_type)
    }

    /// Tooltip rows for a point of the performance chart.
    #[must_use]
    pub fn performance_tooltip(&self, point: &PerformancePoint) -> Vec<TooltipRow> {
        self.tooltip_service.performance_tooltip(point)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Main chart for the selected ticker. `None` when nothing is
    /// selected or the ticker's data is absent; an empty filtered window
    /// still yields a view (empty chart region, no stats).
    fn stock_chart(&self, today: NaiveDate) -> Option<StockChartView> {
        let ticker = self.selection.ticker.as_deref()?;
        let data = self.snapshot.ticker_data(ticker)?;

        let points = self
            .filter_service
            .filter(&data.history, self.selection.time_range, today);
        let delta = self.metrics_service.close_delta(points);

        let price_label = format_currency(delta.map_or(0.0, |d| d.last));
        let change_label = delta.map_or_else(String::new, |d| {
            format!(
                "{} ({})",
                signed_currency(d.absolute_change),
                signed_percent(d.percent_change)
            )
        });

        Some(StockChartView {
            ticker: ticker.to_string(),
            name: or_fallback(&data.info.name, ticker),
            sector: or_fallback(&data.info.sector, "N/A"),
            industry: or_fallback(&data.info.industry, "N/A"),
            points: points.to_vec(),
            delta,
            price_label,
            change_label,
        })
    }

    /// One card per ticker that has both history and an allocation entry,
    /// in snapshot order. Tickers missing either render no card.
    fn cards(&self) -> Vec<StockCardView> {
        self.snapshot
            .tickers
            .iter()
            .filter_map(|ticker| {
                let data = self.snapshot.ticker_data(ticker)?;
                let allocation = self.snapshot.metrics.asset_allocation.get(ticker)?;

                let window_start = data.history.len().saturating_sub(SPARKLINE_WINDOW);
                let closes: Vec<f64> = data.history[window_start..]
                    .iter()
                    .map(|p| p.close)
                    .collect();

                let change = self.metrics_service.price_change(allocation);

                Some(StockCardView {
                    ticker: ticker.clone(),
                    name: or_fallback(&data.info.name, ticker),
                    sector: or_fallback(&data.info.sector, "N/A"),
                    sparkline: self.sparkline_service.project(&closes),
                    sparkline_fill: self.sparkline_service.project_filled(&closes),
                    change: change.percent_change,
                    direction: change.direction,
                    change_label: signed_percent(change.percent_change),
                    price_label: format_currency(allocation.current_price),
                    value_label: format_currency_grouped(allocation.value),
                    weight_label: format!("{:.1}%", allocation.percentage),
                    selected: self.selection.ticker.as_deref() == Some(ticker.as_str()),
                })
            })
            .collect()
    }

    fn metrics_panel(&self) -> MetricsPanelView {
        let metrics = &self.snapshot.metrics;
        let profit_loss = metrics.total_value - metrics.initial_value;

        let return_bars = self
            .snapshot
            .tickers
            .iter()
            .filter_map(|ticker| {
                let pct = *metrics.stock_returns.get(ticker)?;
                Some(ReturnBarView {
                    ticker: ticker.clone(),
                    return_pct: pct,
                    bar_width: self.metrics_service.bar_width(pct),
                    direction: Direction::from_change(pct),
                    label: signed_percent(PercentChange::Value(pct)),
                })
            })
            .collect();

        MetricsPanelView {
            total_value_label: format_currency_grouped(metrics.total_value),
            initial_value_label: format_currency_grouped(metrics.initial_value),
            total_return_label: signed_percent(PercentChange::Value(metrics.total_return)),
            total_return_direction: Direction::from_change(metrics.total_return),
            profit_loss_label: format_currency_grouped(profit_loss.abs()),
            volatility_label: format!("{:.2}%", metrics.volatility),
            sharpe_label: format!("{:.2}", metrics.sharpe_ratio),
            return_bars,
        }
    }

    fn allocation(&self) -> Vec<AllocationSliceView> {
        self.snapshot
            .tickers
            .iter()
            .filter_map(|ticker| {
                let entry = self.snapshot.metrics.asset_allocation.get(ticker)?;
                Some(AllocationSliceView {
                    ticker: ticker.clone(),
                    value: entry.value,
                    percentage: entry.percentage,
                    value_label: format_currency_grouped(entry.value),
                    percentage_label: format!("{:.2}%", entry.percentage),
                    shares_label: format!("{:.4}", entry.shares),
                    price_label: format_currency(entry.current_price),
                    entry_label: format_currency(entry.initial_price),
                })
            })
            .collect()
    }

    /// `None` when no performance series is available; the widget
    /// renders nothing rather than an empty chart with zeroed stats.
    fn performance_view(&self) -> Option<PerformanceView> {
        let delta = self.metrics_service.value_delta(&self.performance)?;

        Some(PerformanceView {
            points: self.performance.clone(),
            delta,
            initial_label: format_currency_grouped(delta.first),
            current_label: format_currency_grouped(delta.last),
            gain_label: format!(
                "{} ({})",
                signed_currency_grouped(delta.absolute_change),
                signed_percent(delta.percent_change)
            ),
        })
    }
}

/// Substitute `fallback` for metadata fields the upstream left empty.
fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

pub use services::tooltip_service::{format_axis_date, format_tooltip_date};
