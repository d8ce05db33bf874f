//! Next-period net income projection.
//!
//! Each top ticker's net income series (table order) is indexed 1..=n, fitted
//! with an ordinary least squares line, and evaluated at n + 1.

use std::collections::BTreeMap;

use crate::num::Metric;
use crate::record::RecordTable;

use super::rank::top_tickers;
use super::stats::LinearFit;

pub type Projections = BTreeMap<String, Metric>;

/// Tickers with fewer than two finite observations are left out.
pub fn profit_projection(table: &RecordTable, top_n: usize) -> Projections {
    let mut out = Projections::new();
    for ticker in top_tickers(table, top_n) {
        let points: Vec<(f64, f64)> = table
            .rows_for(&ticker)
            .map(|r| r.net_income)
            .filter(|v| v.is_finite())
            .enumerate()
            .map(|(i, y)| ((i + 1) as f64, y))
            .collect();

        match LinearFit::fit(&points) {
            Some(fit) => {
                let next = (points.len() + 1) as f64;
                out.insert(ticker, Metric(fit.predict_at(next)));
            }
            None => {
                tracing::debug!(ticker = %ticker, observations = points.len(), "projection skipped");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FinancialRecord;

    #[test]
    fn linear_growth_extrapolates_exactly() {
        let table: RecordTable = vec![
            FinancialRecord::new("A", "2013", 100.0, 1000.0, 0.0),
            FinancialRecord::new("A", "2014", 200.0, 1000.0, 0.0),
            FinancialRecord::new("A", "2015", 300.0, 1000.0, 0.0),
        ]
        .into();
        let p = profit_projection(&table, 10);
        assert_eq!(p.get("A"), Some(&Metric(400.0)));
    }

    #[test]
    fn single_observation_is_omitted() {
        let table: RecordTable = vec![
            FinancialRecord::new("A", "2014", 10.0, 1.0, 0.0),
            FinancialRecord::new("A", "2015", 20.0, 1.0, 0.0),
            FinancialRecord::new("B", "2015", 5.0, 1.0, 0.0),
        ]
        .into();
        let p = profit_projection(&table, 10);
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("A"), Some(&Metric(30.0)));
        assert!(p.get("B").is_none());
    }

    #[test]
    fn undefined_cells_do_not_count() {
        let table: RecordTable = vec![
            FinancialRecord::new("A", "2014", 10.0, 1.0, 0.0),
            FinancialRecord::new("A", "2015", f64::NAN, 1.0, 0.0),
        ]
        .into();
        assert!(profit_projection(&table, 10).is_empty());
    }
}
