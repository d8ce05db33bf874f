//! Metric endpoints.
//!
//! Each handler loads a fresh snapshot of the collection, runs one pure
//! computation from `finsight_core::analytics`, and serializes the result.
//! Handlers share nothing but the injected `AppState`.

pub mod heatmap;
pub mod most_traded;
pub mod portfolio;
pub mod projection;
pub mod returns;

use std::time::Instant;

use finsight_core::RecordTable;

use crate::app_state::AppState;
use crate::error::ApiError;

pub use heatmap::heatmap;
pub use most_traded::most_traded;
pub use portfolio::dummy_portfolio;
pub use projection::profit_projection;
pub use returns::returns_volatility;

/// Full scan through the configured source, with loader accounting.
pub(crate) async fn load_table(state: &AppState) -> Result<RecordTable, ApiError> {
    let t0 = Instant::now();
    let m = state.metrics();
    match state.source().load_all().await {
        Ok(report) => {
            m.records_loaded.add(&[], report.table.len() as u64);
            if report.skipped > 0 {
                m.records_skipped.add(&[], report.skipped as u64);
            }
            tracing::debug!(
                records = report.table.len(),
                skipped = report.skipped,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "table loaded"
            );
            Ok(report.table)
        }
        Err(e) => {
            m.load_errors.inc(&[("code", e.client_code().as_str())]);
            tracing::error!(error = %e, "table load failed");
            Err(e.into())
        }
    }
}
