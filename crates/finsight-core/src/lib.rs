//! finsight core: the fundamentals record model and the metric computations.
//!
//! This crate defines the typed record table and the pure functions that turn
//! it into returns/volatility series, revenue aggregates, trading-activity
//! pivots and profit projections. It carries no transport, runtime, or
//! database dependencies so every metric can be tested on in-memory tables.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Undefined numeric results (division by zero, short windows) are carried as
//! IEEE `NaN`/`inf` values and encoded explicitly, never unwrapped.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod analytics;
pub mod error;
pub mod num;
pub mod record;

/// Shared result type.
pub use error::{Result, FinsightError};
pub use record::{FinancialRecord, RecordTable};
