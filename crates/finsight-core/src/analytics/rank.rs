//! Top-N selection helpers.

use std::collections::HashMap;

use crate::num::nan_sum;
use crate::record::{FinancialRecord, RecordTable};

/// The `n` tickers with the largest summed net income, largest first.
///
/// Undefined cells are skipped by the sum. Ties keep the order in which the
/// tickers first appear in the table.
pub fn top_tickers(table: &RecordTable, n: usize) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, Vec<f64>> = HashMap::new();
    for r in table.rows() {
        let cells = sums.entry(r.ticker.as_str()).or_insert_with(|| {
            order.push(r.ticker.as_str());
            Vec::new()
        });
        cells.push(r.net_income);
    }

    let mut ranked: Vec<(&str, f64)> = order
        .into_iter()
        .map(|t| (t, sums.get(t).map(|c| nan_sum(c.iter().copied())).unwrap_or(0.0)))
        .collect();
    // stable: equal sums stay in first-seen order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(n).map(|(t, _)| t.to_string()).collect()
}

/// The `n` rows with the largest `key`, largest first.
///
/// Rows whose key is undefined are never selected; ties keep table order.
pub fn top_rows_by<F>(table: &RecordTable, n: usize, key: F) -> Vec<&FinancialRecord>
where
    F: Fn(&FinancialRecord) -> f64,
{
    let mut rows: Vec<&FinancialRecord> = table.rows().iter().filter(|r| !key(r).is_nan()).collect();
    rows.sort_by(|a, b| key(b).total_cmp(&key(a)));
    rows.truncate(n);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(t: &str, ni: f64) -> FinancialRecord {
        FinancialRecord::new(t, "2015-12-31", ni, 1.0, ni)
    }

    #[test]
    fn ranks_by_summed_net_income() {
        let table: RecordTable = vec![rec("A", 5.0), rec("B", 7.0), rec("A", 5.0), rec("C", 1.0)].into();
        assert_eq!(top_tickers(&table, 10), vec!["A", "B", "C"]);
        assert_eq!(top_tickers(&table, 2), vec!["A", "B"]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let table: RecordTable = vec![rec("Z", 3.0), rec("M", 3.0), rec("A", 3.0)].into();
        assert_eq!(top_tickers(&table, 10), vec!["Z", "M", "A"]);
    }

    #[test]
    fn never_more_than_n_distinct() {
        let table: RecordTable = (0..25).map(|i| rec(&format!("T{i}"), i as f64)).collect();
        let top = top_tickers(&table, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], "T24");
        assert_eq!(top[9], "T15");
    }

    #[test]
    fn undefined_net_income_is_skipped() {
        let table: RecordTable = vec![rec("A", f64::NAN), rec("A", 2.0), rec("B", 1.0)].into();
        assert_eq!(top_tickers(&table, 10), vec!["A", "B"]);
    }

    #[test]
    fn top_rows_drop_undefined_keys() {
        let table: RecordTable = vec![rec("A", f64::NAN), rec("B", 2.0), rec("C", 9.0)].into();
        let rows = top_rows_by(&table, 5, |r| r.trading_activity);
        let tickers: Vec<&str> = rows.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["C", "B"]);
    }
}
