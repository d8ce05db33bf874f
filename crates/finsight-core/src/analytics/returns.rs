//! Returns and rolling volatility.
//!
//! Returns are computed per row and the volatility window slides over the
//! whole table in scan order, across tickers. Only afterwards are the rows
//! restricted to the top tickers, so a window may mix several companies when
//! the collection is not stored grouped by ticker.

use std::collections::HashSet;

use serde::Serialize;

use crate::num::Metric;
use crate::record::RecordTable;

use super::rank::top_tickers;
use super::stats::rolling_std;
use super::AnalyticsParams;

/// One output row of `/returns-volatility`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnsRow {
    #[serde(rename = "Ticker Symbol")]
    pub ticker: String,
    #[serde(rename = "Returns")]
    pub returns: Metric,
    #[serde(rename = "Volatility")]
    pub volatility: Metric,
}

pub fn returns_volatility(table: &RecordTable, params: &AnalyticsParams) -> Vec<ReturnsRow> {
    let returns: Vec<f64> = table.rows().iter().map(|r| r.returns()).collect();
    let volatility = rolling_std(&returns, params.volatility_window);

    let top: HashSet<String> = top_tickers(table, params.top_n).into_iter().collect();

    table
        .rows()
        .iter()
        .zip(returns.iter().zip(volatility.iter()))
        .filter(|(r, _)| top.contains(&r.ticker))
        .map(|(r, (&ret, &vol))| ReturnsRow {
            ticker: r.ticker.clone(),
            returns: Metric(ret),
            volatility: Metric(vol),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::record::FinancialRecord;

    #[test]
    fn constant_ratio_has_zero_volatility_after_window() {
        let table: RecordTable = (1..=7)
            .map(|i| FinancialRecord::new("A", format!("201{i}"), 10.0 * i as f64, 40.0 * i as f64, 1.0))
            .collect();
        let rows = returns_volatility(&table, &AnalyticsParams::default());
        assert_eq!(rows.len(), 7);
        for r in &rows {
            assert_eq!(r.returns, Metric(0.25));
        }
        assert!(rows[..4].iter().all(|r| !r.volatility.is_defined()));
        assert!(rows[4..].iter().all(|r| r.volatility == Metric(0.0)));
    }

    #[test]
    fn window_spans_tickers_in_table_order() {
        // B is outside the top-1 but its rows still feed A's window
        let table: RecordTable = vec![
            FinancialRecord::new("A", "1", 100.0, 100.0, 0.0),
            FinancialRecord::new("B", "1", 1.0, 2.0, 0.0),
            FinancialRecord::new("A", "2", 100.0, 100.0, 0.0),
            FinancialRecord::new("A", "3", 100.0, 100.0, 0.0),
            FinancialRecord::new("A", "4", 100.0, 100.0, 0.0),
        ]
        .into();
        let params = AnalyticsParams { top_n: 1, ..AnalyticsParams::default() };
        let rows = returns_volatility(&table, &params);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.ticker == "A"));
        let last = rows[3].volatility.value();
        assert!(last > 0.0, "window includes B's 0.5 return, got {last}");
    }

    #[test]
    fn zero_revenue_is_encoded_not_dropped() {
        let table: RecordTable = vec![FinancialRecord::new("A", "1", 5.0, 0.0, 0.0)].into();
        let rows = returns_volatility(&table, &AnalyticsParams::default());
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"Ticker Symbol": "A", "Returns": "Infinity", "Volatility": null}])
        );
    }
}
