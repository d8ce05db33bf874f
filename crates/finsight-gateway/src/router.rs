//! Axum router wiring.
//!
//! Metric endpoints plus ops endpoints, wrapped in request accounting,
//! tracing, and (optionally) a permissive CORS layer for browser dashboards.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{app_state::AppState, handlers, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/returns-volatility", get(handlers::returns_volatility))
        .route("/dummy-portfolio", get(handlers::dummy_portfolio))
        .route("/heatmap", get(handlers::heatmap))
        .route("/profit-projection", get(handlers::profit_projection))
        .route("/most-traded", get(handlers::most_traded))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), obs::track_requests))
        .layer(TraceLayer::new_for_http());

    let app = if state.cfg().server.cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    };

    app.with_state(state)
}
