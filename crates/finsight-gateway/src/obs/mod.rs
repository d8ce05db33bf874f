//! Lightweight in-process metrics (dependency-free).
//!
//! Request counters, in-flight gauges, and handler latency histograms are
//! recorded by the `track_requests` middleware; loader counters are recorded by
//! the handlers. Everything is rendered by the `/metrics` handler.

pub mod metrics;

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub use metrics::ServiceMetrics;

/// Per-route request accounting. Installed with `route_layer`, so the matched
/// route template is available and unknown paths are not recorded.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".into());

    let m = state.metrics();
    let labels = [("route", route.as_str())];
    m.requests_in_flight.inc(&labels);
    let t0 = Instant::now();

    let resp = next.run(req).await;

    m.requests_in_flight.dec(&labels);
    m.handler_duration.observe(&labels, t0.elapsed());
    m.http_requests
        .inc(&[("route", route.as_str()), ("status", resp.status().as_str())]);
    resp
}
