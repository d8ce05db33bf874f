//! Trading-activity heatmap.
//!
//! Picks the most active rows (row-level, not per ticker) and pivots them into
//! a ticker x period matrix. Duplicate (ticker, period) cells are averaged and
//! absent cells are 0.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::num::Metric;
use crate::record::RecordTable;

use super::rank::top_rows_by;

/// A row picked for the pivot. `investments` mirrors total revenue and does
/// not take part in the pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRow {
    pub ticker: String,
    pub period_ending: String,
    pub trading_activity: f64,
    pub investments: f64,
}

/// ticker -> period -> trading activity. Every ticker row carries every period.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HeatmapMatrix {
    cells: BTreeMap<String, BTreeMap<String, Metric>>,
}

impl HeatmapMatrix {
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Column labels, sorted.
    pub fn periods(&self) -> Vec<&str> {
        self.cells
            .values()
            .next()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, ticker: &str, period: &str) -> Option<f64> {
        self.cells.get(ticker).and_then(|row| row.get(period)).map(|m| m.value())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major values in `tickers()` x `periods()` order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, Vec<f64>)> {
        self.cells
            .iter()
            .map(|(t, row)| (t.as_str(), row.values().map(|m| m.value()).collect()))
    }

    /// Largest finite cell value; 0 for an empty matrix.
    pub fn max_value(&self) -> f64 {
        self.cells
            .values()
            .flat_map(|row| row.values().map(|m| m.value()))
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

pub fn select_rows(table: &RecordTable, n: usize) -> Vec<HeatmapRow> {
    top_rows_by(table, n, |r| r.trading_activity)
        .into_iter()
        .map(|r| HeatmapRow {
            ticker: r.ticker.clone(),
            period_ending: r.period_ending.clone(),
            trading_activity: r.trading_activity,
            investments: r.investments(),
        })
        .collect()
}

pub fn pivot(rows: &[HeatmapRow]) -> HeatmapMatrix {
    let periods: BTreeSet<&str> = rows.iter().map(|r| r.period_ending.as_str()).collect();

    let mut acc: BTreeMap<(&str, &str), (f64, usize)> = BTreeMap::new();
    for r in rows {
        let e = acc
            .entry((r.ticker.as_str(), r.period_ending.as_str()))
            .or_insert((0.0, 0));
        e.0 += r.trading_activity;
        e.1 += 1;
    }

    let mut cells: BTreeMap<String, BTreeMap<String, Metric>> = BTreeMap::new();
    for r in rows {
        cells.entry(r.ticker.clone()).or_insert_with(|| {
            periods.iter().map(|p| (p.to_string(), Metric(0.0))).collect()
        });
    }
    for ((ticker, period), (sum, count)) in acc {
        if let Some(row) = cells.get_mut(ticker) {
            row.insert(period.to_string(), Metric(sum / count as f64));
        }
    }

    HeatmapMatrix { cells }
}

pub fn trading_heatmap(table: &RecordTable, n_rows: usize) -> HeatmapMatrix {
    pivot(&select_rows(table, n_rows))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::record::FinancialRecord;

    fn table() -> RecordTable {
        vec![
            FinancialRecord::new("A", "2014", 0.0, 11.0, 5.0),
            FinancialRecord::new("B", "2015", 0.0, 12.0, 9.0),
            FinancialRecord::new("A", "2015", 0.0, 13.0, 7.0),
            FinancialRecord::new("C", "2016", 0.0, 14.0, 1.0),
        ]
        .into()
    }

    #[test]
    fn selected_cells_set_others_zero() {
        let m = trading_heatmap(&table(), 3);
        assert_eq!(m.tickers().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(m.periods(), vec!["2014", "2015"]);
        assert_eq!(m.get("A", "2014"), Some(5.0));
        assert_eq!(m.get("A", "2015"), Some(7.0));
        assert_eq!(m.get("B", "2015"), Some(9.0));
        assert_eq!(m.get("B", "2014"), Some(0.0));
        assert_eq!(m.get("C", "2016"), None);
    }

    #[test]
    fn duplicate_cells_are_averaged() {
        let t: RecordTable = vec![
            FinancialRecord::new("A", "2015", 0.0, 0.0, 4.0),
            FinancialRecord::new("A", "2015", 0.0, 0.0, 8.0),
        ]
        .into();
        let m = trading_heatmap(&t, 50);
        assert_eq!(m.get("A", "2015"), Some(6.0));
    }

    #[test]
    fn investments_mirror_revenue() {
        let rows = select_rows(&table(), 2);
        assert_eq!(rows[0].ticker, "B");
        assert_eq!(rows[0].investments, 12.0);
    }

    #[test]
    fn serializes_ticker_major() {
        let m = trading_heatmap(&table(), 1);
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v, serde_json::json!({"B": {"2015": 9.0}}));
    }

    #[test]
    fn unbounded_activity_encodes_like_other_metrics() {
        let t: RecordTable = vec![
            FinancialRecord::new("A", "2015", 0.0, 0.0, f64::INFINITY),
            FinancialRecord::new("B", "2015", 0.0, 0.0, 4.0),
        ]
        .into();
        let m = trading_heatmap(&t, 50);
        assert_eq!(m.max_value(), 4.0);
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v, serde_json::json!({"A": {"2015": "Infinity"}, "B": {"2015": 4.0}}));
    }
}
