//! Most actively traded rows.

use serde::Serialize;

use crate::num::Metric;
use crate::record::RecordTable;

use super::rank::top_rows_by;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradedRow {
    #[serde(rename = "Ticker Symbol")]
    pub ticker: String,
    #[serde(rename = "Period Ending")]
    pub period_ending: String,
    #[serde(rename = "Trading Activity")]
    pub trading_activity: Metric,
}

pub fn most_traded(table: &RecordTable, n: usize) -> Vec<TradedRow> {
    top_rows_by(table, n, |r| r.trading_activity)
        .into_iter()
        .map(|r| TradedRow {
            ticker: r.ticker.clone(),
            period_ending: r.period_ending.clone(),
            trading_activity: Metric(r.trading_activity),
        })
        .collect()
}
