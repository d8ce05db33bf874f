//! BSON document -> `FinancialRecord` decoding.
//!
//! Coercion rules:
//! - numeric cells: double, int32, int64, or a numeric string; missing/null is `NaN`
//! - `Period Ending`: string, datetime (`YYYY-MM-DD`), or integer; missing is empty
//! - `Ticker Symbol`: required string
//!
//! Anything else makes the document malformed. `_id` and unknown fields are ignored.

use mongodb::bson::{Bson, Document};

use finsight_core::error::{Result, FinsightError};
use finsight_core::record::{
    FinancialRecord, NET_INCOME, PERIOD_ENDING, TICKER_SYMBOL, TOTAL_REVENUE, TRADING_ACTIVITY,
};
use finsight_core::RecordTable;

use crate::config::MalformedPolicy;

use super::LoadReport;

pub fn decode_record(doc: &Document) -> std::result::Result<FinancialRecord, String> {
    let ticker = match doc.get(TICKER_SYMBOL) {
        Some(Bson::String(s)) if !s.is_empty() => s.clone(),
        Some(Bson::String(_)) => return Err(format!("{TICKER_SYMBOL} is empty")),
        Some(other) => {
            return Err(format!("{TICKER_SYMBOL} must be a string, got {:?}", other.element_type()))
        }
        None => return Err(format!("missing {TICKER_SYMBOL}")),
    };

    Ok(FinancialRecord {
        ticker,
        net_income: numeric(doc, NET_INCOME)?,
        total_revenue: numeric(doc, TOTAL_REVENUE)?,
        period_ending: period(doc)?,
        trading_activity: numeric(doc, TRADING_ACTIVITY)?,
    })
}

fn numeric(doc: &Document, field: &str) -> std::result::Result<f64, String> {
    match doc.get(field) {
        None | Some(Bson::Null) => Ok(f64::NAN),
        Some(Bson::Double(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(f64::from(*v)),
        Some(Bson::Int64(v)) => Ok(*v as f64),
        Some(Bson::String(s)) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .map_err(|_| format!("{field} is not numeric: {s:?}")),
        Some(other) => Err(format!("{field} has unsupported type {:?}", other.element_type())),
    }
}

fn period(doc: &Document) -> std::result::Result<String, String> {
    match doc.get(PERIOD_ENDING) {
        None | Some(Bson::Null) => Ok(String::new()),
        Some(Bson::String(s)) => Ok(s.clone()),
        Some(Bson::DateTime(dt)) => {
            let s = dt
                .try_to_rfc3339_string()
                .map_err(|e| format!("{PERIOD_ENDING} out of range: {e}"))?;
            Ok(s.get(..10).unwrap_or(s.as_str()).to_string())
        }
        Some(Bson::Int32(v)) => Ok(v.to_string()),
        Some(Bson::Int64(v)) => Ok(v.to_string()),
        Some(other) => Err(format!(
            "{PERIOD_ENDING} has unsupported type {:?}",
            other.element_type()
        )),
    }
}

/// Accumulates decoded documents, applying the malformed-record policy.
pub struct TableBuilder {
    policy: MalformedPolicy,
    rows: Vec<FinancialRecord>,
    seen: usize,
    skipped: usize,
}

impl TableBuilder {
    pub fn new(policy: MalformedPolicy) -> Self {
        Self {
            policy,
            rows: Vec::new(),
            seen: 0,
            skipped: 0,
        }
    }

    pub fn push(&mut self, doc: &Document) -> Result<()> {
        let index = self.seen;
        self.seen += 1;
        match decode_record(doc) {
            Ok(rec) => {
                self.rows.push(rec);
                Ok(())
            }
            Err(reason) => match self.policy {
                MalformedPolicy::Skip => {
                    tracing::warn!(index, reason = %reason, "skipping malformed record");
                    self.skipped += 1;
                    Ok(())
                }
                MalformedPolicy::Fail => Err(FinsightError::MalformedRecord { index, reason }),
            },
        }
    }

    pub fn finish(self) -> LoadReport {
        LoadReport {
            table: RecordTable::new(self.rows),
            skipped: self.skipped,
        }
    }
}
