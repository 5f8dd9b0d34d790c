// ═══════════════════════════════════════════════════════════════════
// View Tests — MarketTerminal facade: state machine, derivation,
// graceful degradation
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::collections::HashMap;

use market_terminal_core::models::price::{PerformancePoint, PricePoint};
use market_terminal_core::models::selection::{ChartType, TimeRange};
use market_terminal_core::models::snapshot::{
    AllocationEntry, PortfolioMetrics, PortfolioSnapshot, TickerData, TickerInfo,
};
use market_terminal_core::models::view::{Direction, PercentChange};
use market_terminal_core::MarketTerminal;

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bar(date: NaiveDate, close: f64) -> PricePoint {
    PricePoint {
        date,
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000_000.0,
    }
}

fn allocation(current_price: f64, initial_price: f64, value: f64, percentage: f64) -> AllocationEntry {
    AllocationEntry {
        value,
        shares: value / current_price,
        current_price,
        initial_price,
        percentage,
    }
}

/// Snapshot with three data-bearing tickers:
/// - AAPL: sparse history, allocation, stock return
/// - MSFT: 40 daily bars (exercises the 30-close sparkline window)
/// - NOAL: history but no allocation entry (renders no card)
/// plus "GHOST" in the ticker list with no data at all.
fn sample_snapshot() -> PortfolioSnapshot {
    let mut data = HashMap::new();

    data.insert(
        "AAPL".to_string(),
        TickerData {
            history: vec![
                bar(make_date(2020, 1, 15), 100.0),
                bar(make_date(2024, 6, 10), 180.0),
                bar(make_date(2024, 6, 14), 185.0),
            ],
            info: TickerInfo {
                name: "Apple Inc.".into(),
                sector: "Technology".into(),
                industry: "Consumer Electronics".into(),
            },
        },
    );

    let msft_history: Vec<PricePoint> = (1..=40)
        .map(|i| {
            let date = make_date(2024, 4, 1) + chrono::Duration::days(i);
            bar(date, 300.0 + i as f64)
        })
        .collect();
    data.insert(
        "MSFT".to_string(),
        TickerData {
            history: msft_history,
            // Empty metadata exercises the view fallbacks
            info: TickerInfo::default(),
        },
    );

    data.insert(
        "NOAL".to_string(),
        TickerData {
            history: vec![bar(make_date(2024, 6, 1), 50.0)],
            info: TickerInfo::default(),
        },
    );

    let mut asset_allocation = HashMap::new();
    asset_allocation.insert("AAPL".to_string(), allocation(185.0, 120.0, 1923.08, 1.92));
    asset_allocation.insert("MSFT".to_string(), allocation(340.0, 400.0, 1700.0, 1.7));

    let mut stock_returns = HashMap::new();
    stock_returns.insert("AAPL".to_string(), 54.17);
    stock_returns.insert("MSFT".to_string(), -120.5);

    PortfolioSnapshot {
        data,
        metrics: PortfolioMetrics {
            total_value: 123_456.0,
            initial_value: 100_000.0,
            total_return: 23.46,
            volatility: 18.2,
            sharpe_ratio: 1.07,
            asset_allocation,
            stock_returns,
        },
        tickers: vec![
            "AAPL".into(),
            "MSFT".into(),
            "NOAL".into(),
            "GHOST".into(),
        ],
    }
}

fn sample_performance() -> Vec<PerformancePoint> {
    vec![
        PerformancePoint {
            date: make_date(2020, 1, 1),
            value: 100_000.0,
        },
        PerformancePoint {
            date: make_date(2024, 6, 1),
            value: 123_456.0,
        },
    ]
}

fn terminal() -> MarketTerminal {
    MarketTerminal::new(sample_snapshot(), sample_performance())
}

fn today() -> NaiveDate {
    make_date(2024, 6, 15)
}

// ═══════════════════════════════════════════════════════════════════
// State machine
// ═══════════════════════════════════════════════════════════════════

mod transitions {
    use super::*;

    #[test]
    fn initial_state() {
        let terminal = terminal();
        let selection = terminal.selection();
        assert_eq!(selection.ticker.as_deref(), Some("AAPL"));
        assert_eq!(selection.chart_type, ChartType::Area);
        assert_eq!(selection.time_range, TimeRange::All);
    }

    #[test]
    fn initial_ticker_none_for_empty_snapshot() {
        let terminal = MarketTerminal::new(PortfolioSnapshot::default(), Vec::new());
        assert_eq!(terminal.selection().ticker, None);
    }

    #[test]
    fn select_known_ticker() {
        let mut terminal = terminal();
        terminal.select_ticker("MSFT");
        assert_eq!(terminal.selection().ticker.as_deref(), Some("MSFT"));
    }

    #[test]
    fn select_unknown_ticker_is_a_no_op() {
        let mut terminal = terminal();
        let before = terminal.selection().clone();

        terminal.select_ticker("ZZZZ");

        assert_eq!(terminal.selection(), &before);
    }

    #[test]
    fn select_listed_but_dataless_ticker_is_a_no_op() {
        // "GHOST" appears in the ticker list but has no data entry
        let mut terminal = terminal();
        let before = terminal.selection().clone();
        terminal.select_ticker("GHOST");
        assert_eq!(terminal.selection(), &before);
    }

    #[test]
    fn set_chart_type() {
        let mut terminal = terminal();
        terminal.set_chart_type(ChartType::Candlestick);
        assert_eq!(terminal.selection().chart_type, ChartType::Candlestick);
    }

    #[test]
    fn set_time_range() {
        let mut terminal = terminal();
        terminal.set_time_range(TimeRange::OneMonth);
        assert_eq!(terminal.selection().time_range, TimeRange::OneMonth);
    }

    #[test]
    fn transitions_leave_base_data_untouched() {
        let mut terminal = terminal();
        let snapshot_before = terminal.snapshot().clone();

        terminal.select_ticker("MSFT");
        terminal.set_chart_type(ChartType::Line);
        terminal.set_time_range(TimeRange::ThreeMonths);

        assert_eq!(terminal.snapshot(), &snapshot_before);
        assert_eq!(terminal.performance(), &sample_performance()[..]);
    }

    #[test]
    fn replace_data_resets_selection() {
        let mut terminal = terminal();
        terminal.select_ticker("MSFT");
        terminal.set_chart_type(ChartType::Candlestick);
        terminal.set_time_range(TimeRange::OneMonth);

        let mut new_snapshot = PortfolioSnapshot::default();
        new_snapshot.tickers = vec!["NVDA".into()];
        new_snapshot
            .data
            .insert("NVDA".into(), TickerData::default());

        terminal.replace_data(new_snapshot, Vec::new());

        let selection = terminal.selection();
        assert_eq!(selection.ticker.as_deref(), Some("NVDA"));
        assert_eq!(selection.chart_type, ChartType::Area);
        assert_eq!(selection.time_range, TimeRange::All);
        assert!(terminal.performance().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Derivation — stock chart
// ═══════════════════════════════════════════════════════════════════

mod stock_chart {
    use super::*;

    #[test]
    fn full_history_when_range_is_all() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());
        let chart = view.stock_chart.unwrap();

        assert_eq!(chart.ticker, "AAPL");
        assert_eq!(chart.name, "Apple Inc.");
        assert_eq!(chart.sector, "Technology");
        assert_eq!(chart.industry, "Consumer Electronics");
        assert_eq!(chart.points.len(), 3);

        let delta = chart.delta.unwrap();
        assert_eq!(delta.first, 100.0);
        assert_eq!(delta.last, 185.0);
        assert_eq!(delta.absolute_change, 85.0);
        assert_eq!(delta.direction, Direction::Positive);
        assert_eq!(chart.price_label, "$185.00");
        assert_eq!(chart.change_label, "+$85.00 (+85.00%)");
    }

    #[test]
    fn time_range_narrows_the_window() {
        let mut terminal = terminal();
        terminal.set_time_range(TimeRange::OneMonth);
        let view = terminal.dashboard_at(today());
        let chart = view.stock_chart.unwrap();

        // Cutoff 2024-05-15 leaves only the two June bars
        assert_eq!(chart.points.len(), 2);
        let delta = chart.delta.unwrap();
        assert_eq!(delta.first, 180.0);
        assert_eq!(delta.last, 185.0);
    }

    #[test]
    fn empty_window_renders_empty_chart_region() {
        let mut terminal = terminal();
        terminal.select_ticker("NOAL");
        terminal.set_time_range(TimeRange::OneMonth);
        // NOAL's only bar is 2024-06-01; evaluate far in the future
        let view = terminal.dashboard_at(make_date(2030, 1, 1));
        let chart = view.stock_chart.unwrap();

        assert!(chart.points.is_empty());
        assert!(chart.delta.is_none());
        assert_eq!(chart.price_label, "$0.00");
        assert_eq!(chart.change_label, "");
    }

    #[test]
    fn empty_metadata_falls_back() {
        let mut terminal = terminal();
        terminal.select_ticker("MSFT");
        let view = terminal.dashboard_at(today());
        let chart = view.stock_chart.unwrap();

        assert_eq!(chart.name, "MSFT");
        assert_eq!(chart.sector, "N/A");
        assert_eq!(chart.industry, "N/A");
    }

    #[test]
    fn none_when_nothing_selected() {
        let terminal = MarketTerminal::new(PortfolioSnapshot::default(), Vec::new());
        let view = terminal.dashboard_at(today());
        assert!(view.stock_chart.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Derivation — cards, metrics, allocation, performance
// ═══════════════════════════════════════════════════════════════════

mod cards {
    use super::*;

    #[test]
    fn one_card_per_fully_populated_ticker() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());

        // NOAL has no allocation, GHOST has no data — neither gets a card
        let tickers: Vec<&str> = view.cards.iter().map(|c| c.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn selected_flag_tracks_selection() {
        let mut terminal = terminal();
        let view = terminal.dashboard_at(today());
        assert!(view.cards[0].selected);
        assert!(!view.cards[1].selected);

        terminal.select_ticker("MSFT");
        let view = terminal.dashboard_at(today());
        assert!(!view.cards[0].selected);
        assert!(view.cards[1].selected);
    }

    #[test]
    fn sparkline_covers_last_thirty_closes() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());

        // MSFT has 40 bars; the sparkline takes the trailing 30
        let msft = &view.cards[1];
        assert_eq!(msft.sparkline.commands.len(), 30);
        // Fill variant adds two baseline points and a close
        assert_eq!(msft.sparkline_fill.commands.len(), 33);
    }

    #[test]
    fn short_history_sparkline_uses_all_points() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());
        assert_eq!(view.cards[0].sparkline.commands.len(), 3);
    }

    #[test]
    fn card_change_comes_from_allocation_prices() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());

        let aapl = &view.cards[0];
        // 120 → 185 is +54.17%
        assert_eq!(aapl.direction, Direction::Positive);
        assert_eq!(aapl.change_label, "+54.17%");
        assert_eq!(aapl.price_label, "$185.00");
        assert_eq!(aapl.value_label, "$1,923.08");
        assert_eq!(aapl.weight_label, "1.9%");

        let msft = &view.cards[1];
        // 400 → 340 is -15%
        assert_eq!(msft.direction, Direction::Negative);
        assert_eq!(msft.change_label, "-15.00%");
    }

    #[test]
    fn card_name_falls_back_to_ticker() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());
        assert_eq!(view.cards[1].name, "MSFT");
        assert_eq!(view.cards[1].sector, "N/A");
    }
}

mod metrics_panel {
    use super::*;

    #[test]
    fn headline_labels() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());
        let metrics = view.metrics;

        assert_eq!(metrics.total_value_label, "$123,456.00");
        assert_eq!(metrics.initial_value_label, "$100,000.00");
        assert_eq!(metrics.total_return_label, "+23.46%");
        assert_eq!(metrics.total_return_direction, Direction::Positive);
        assert_eq!(metrics.profit_loss_label, "$23,456.00");
        assert_eq!(metrics.volatility_label, "18.20%");
        assert_eq!(metrics.sharpe_label, "1.07");
    }

    #[test]
    fn return_bars_in_snapshot_order_with_clamped_widths() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());
        let bars = &view.metrics.return_bars;

        assert_eq!(bars.len(), 2);

        assert_eq!(bars[0].ticker, "AAPL");
        assert_eq!(bars[0].return_pct, 54.17);
        assert_eq!(bars[0].bar_width, 54.17);
        assert_eq!(bars[0].direction, Direction::Positive);
        assert_eq!(bars[0].label, "+54.17%");

        assert_eq!(bars[1].ticker, "MSFT");
        assert_eq!(bars[1].return_pct, -120.5);
        // Width is a display clamp; the raw return stays uncapped
        assert_eq!(bars[1].bar_width, 100.0);
        assert_eq!(bars[1].direction, Direction::Negative);
        assert_eq!(bars[1].label, "-120.50%");
    }
}

mod allocation_view {
    use super::*;

    #[test]
    fn slices_in_snapshot_order() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());
        let tickers: Vec<&str> = view.allocation.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn slice_labels() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());
        let aapl = &view.allocation[0];

        assert_eq!(aapl.value, 1923.08);
        assert_eq!(aapl.percentage, 1.92);
        assert_eq!(aapl.value_label, "$1,923.08");
        assert_eq!(aapl.percentage_label, "1.92%");
        assert_eq!(aapl.price_label, "$185.00");
        assert_eq!(aapl.entry_label, "$120.00");
    }
}

mod performance_view {
    use super::*;

    #[test]
    fn derives_gain_over_the_full_series() {
        let terminal = terminal();
        let view = terminal.dashboard_at(today());
        let perf = view.performance.unwrap();

        assert_eq!(perf.points.len(), 2);
        assert_eq!(perf.initial_label, "$100,000.00");
        assert_eq!(perf.current_label, "$123,456.00");
        assert_eq!(perf.gain_label, "+$23,456.00 (+23.46%)");
        assert_eq!(perf.delta.direction, Direction::Positive);
    }

    #[test]
    fn none_when_series_is_empty() {
        let terminal = MarketTerminal::new(sample_snapshot(), Vec::new());
        let view = terminal.dashboard_at(today());
        assert!(view.performance.is_none());
    }

    #[test]
    fn zero_initial_value_tags_percent_undefined() {
        let performance = vec![
            PerformancePoint {
                date: make_date(2020, 1, 1),
                value: 0.0,
            },
            PerformancePoint {
                date: make_date(2024, 1, 1),
                value: 50_000.0,
            },
        ];
        let terminal = MarketTerminal::new(sample_snapshot(), performance);
        let view = terminal.dashboard_at(today());
        let perf = view.performance.unwrap();

        assert_eq!(perf.delta.percent_change, PercentChange::Undefined);
        assert_eq!(perf.gain_label, "+$50,000.00 (N/A)");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Recomputation policy
// ═══════════════════════════════════════════════════════════════════

mod recomputation {
    use super::*;

    #[test]
    fn derivation_is_idempotent() {
        let terminal = terminal();
        let first = terminal.dashboard_at(today());
        let second = terminal.dashboard_at(today());
        assert_eq!(first, second);
    }

    #[test]
    fn idempotent_across_selection_round_trip() {
        let mut terminal = terminal();
        let before = terminal.dashboard_at(today());

        terminal.select_ticker("MSFT");
        terminal.set_time_range(TimeRange::OneMonth);
        terminal.select_ticker("AAPL");
        terminal.set_time_range(TimeRange::All);

        let after = terminal.dashboard_at(today());
        assert_eq!(before, after);
    }

    #[test]
    fn serialized_view_is_byte_identical() {
        let terminal = terminal();
        let first = serde_json::to_string(&terminal.dashboard_at(today())).unwrap();
        let second = serde_json::to_string(&terminal.dashboard_at(today())).unwrap();
        assert_eq!(first, second);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Tooltip passthrough
// ═══════════════════════════════════════════════════════════════════

mod tooltips {
    use super::*;

    #[test]
    fn price_tooltip_follows_chart_type() {
        let mut terminal = terminal();
        let point = bar(make_date(2024, 6, 14), 101.5);

        let rows = terminal.price_tooltip(&point);
        assert_eq!(rows.len(), 2); // area mode

        terminal.set_chart_type(ChartType::Candlestick);
        let rows = terminal.price_tooltip(&point);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn performance_tooltip_rows() {
        let terminal = terminal();
        let point = PerformancePoint {
            date: make_date(2024, 6, 1),
            value: 123_456.0,
        };
        let rows = terminal.performance_tooltip(&point);
        assert_eq!(rows[0].value, "June 1, 2024");
        assert_eq!(rows[1].value, "$123,456.00");
    }
}
