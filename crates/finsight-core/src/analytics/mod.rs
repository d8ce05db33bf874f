//! Metric computations over a loaded `RecordTable`.
//!
//! Every function here is pure: it reads the table snapshot and returns an
//! owned, serializable result. Handlers share no state.
//!
//! - `rank`: top-N ticker selection by summed net income (shared by most metrics)
//! - `returns`: per-row returns and rolling volatility
//! - `portfolio`: summed revenue per top ticker
//! - `heatmap`: trading-activity pivot over the most active rows
//! - `projection`: next-period net income by least squares
//! - `most_traded`: most active rows
//! - `stats`: rolling deviation and linear fit primitives

pub mod heatmap;
pub mod most_traded;
pub mod portfolio;
pub mod projection;
pub mod rank;
pub mod returns;
pub mod stats;

pub use heatmap::{trading_heatmap, HeatmapMatrix};
pub use most_traded::{most_traded, TradedRow};
pub use portfolio::{revenue_by_top_ticker, Portfolio};
pub use projection::{profit_projection, Projections};
pub use rank::{top_rows_by, top_tickers};
pub use returns::{returns_volatility, ReturnsRow};

/// Tunables shared by the metric computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsParams {
    /// How many tickers the top-N selection keeps.
    pub top_n: usize,
    /// Rolling window length for volatility.
    pub volatility_window: usize,
    /// How many rows feed the heatmap pivot.
    pub heatmap_rows: usize,
    /// How many rows the most-traded listing returns.
    pub most_traded: usize,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            top_n: 10,
            volatility_window: 5,
            heatmap_rows: 50,
            most_traded: 10,
        }
    }
}
