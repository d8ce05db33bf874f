//! Fundamentals record model.
//!
//! One `FinancialRecord` per (company, reporting period). Field names on the
//! wire follow the stored documents (`"Ticker Symbol"`, `"Net Income"`, ...).
//! Numeric cells that are missing upstream are carried as `NaN`.

use serde::{Deserialize, Deserializer, Serialize};

pub const TICKER_SYMBOL: &str = "Ticker Symbol";
pub const NET_INCOME: &str = "Net Income";
pub const TOTAL_REVENUE: &str = "Total Revenue";
pub const PERIOD_ENDING: &str = "Period Ending";
pub const TRADING_ACTIVITY: &str = "Trading Activity";

/// A single fundamentals row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    #[serde(rename = "Ticker Symbol")]
    pub ticker: String,
    #[serde(rename = "Net Income", default = "undefined", deserialize_with = "nullable_f64")]
    pub net_income: f64,
    #[serde(rename = "Total Revenue", default = "undefined", deserialize_with = "nullable_f64")]
    pub total_revenue: f64,
    #[serde(rename = "Period Ending", default)]
    pub period_ending: String,
    #[serde(rename = "Trading Activity", default = "undefined", deserialize_with = "nullable_f64")]
    pub trading_activity: f64,
}

impl FinancialRecord {
    pub fn new(
        ticker: impl Into<String>,
        period_ending: impl Into<String>,
        net_income: f64,
        total_revenue: f64,
        trading_activity: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            net_income,
            total_revenue,
            period_ending: period_ending.into(),
            trading_activity,
        }
    }

    /// Per-row return ratio. IEEE semantics: `x/0` is infinite, `0/0` is `NaN`.
    pub fn returns(&self) -> f64 {
        self.net_income / self.total_revenue
    }

    /// Alias of total revenue exposed to the heatmap selection.
    pub fn investments(&self) -> f64 {
        self.total_revenue
    }
}

fn undefined() -> f64 {
    f64::NAN
}

fn nullable_f64<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

/// Snapshot of the whole collection, in scan order.
///
/// Table order is significant: rolling windows and regression indices follow it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    rows: Vec<FinancialRecord>,
}

impl RecordTable {
    pub fn new(rows: Vec<FinancialRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FinancialRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to `ticker`, in table order.
    pub fn rows_for<'a>(&'a self, ticker: &'a str) -> impl Iterator<Item = &'a FinancialRecord> + 'a {
        self.rows.iter().filter(move |r| r.ticker == ticker)
    }
}

impl From<Vec<FinancialRecord>> for RecordTable {
    fn from(rows: Vec<FinancialRecord>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<FinancialRecord> for RecordTable {
    fn from_iter<I: IntoIterator<Item = FinancialRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn missing_numeric_cells_are_undefined() {
        let rec: FinancialRecord = serde_json::from_str(
            r#"{"Ticker Symbol": "AAL", "Net Income": null, "Period Ending": "2012-12-31"}"#,
        )
        .unwrap();
        assert_eq!(rec.ticker, "AAL");
        assert!(rec.net_income.is_nan());
        assert!(rec.total_revenue.is_nan());
        assert!(rec.trading_activity.is_nan());
    }

    #[test]
    fn returns_by_zero_revenue_is_infinite() {
        let rec = FinancialRecord::new("X", "2015", 5.0, 0.0, 1.0);
        assert_eq!(rec.returns(), f64::INFINITY);
        let rec = FinancialRecord::new("X", "2015", 0.0, 0.0, 1.0);
        assert!(rec.returns().is_nan());
    }
}
