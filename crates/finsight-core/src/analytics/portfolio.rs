//! Revenue aggregation for the top tickers.

use std::collections::BTreeMap;

use crate::num::{nan_sum, Metric};
use crate::record::RecordTable;

use super::rank::top_tickers;

/// Ticker -> summed total revenue, keyed in sorted order.
pub type Portfolio = BTreeMap<String, Metric>;

pub fn revenue_by_top_ticker(table: &RecordTable, top_n: usize) -> Portfolio {
    top_tickers(table, top_n)
        .into_iter()
        .map(|t| {
            let total = nan_sum(table.rows_for(&t).map(|r| r.total_revenue));
            (t, Metric(total))
        })
        .collect()
}
