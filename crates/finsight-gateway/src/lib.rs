//! finsight gateway library entry.
//!
//! This crate wires the config, record store, metric handlers, chart
//! rendering, and ops endpoints into an axum service. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod render;
pub mod router;
pub mod store;
