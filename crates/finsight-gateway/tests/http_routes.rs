//! Router-level tests against an in-memory record source.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mongodb::bson::{doc, Document};
use serde_json::{json, Value};
use tower::ServiceExt;

use finsight_gateway::app_state::AppState;
use finsight_gateway::config;
use finsight_gateway::router::build_router;
use finsight_gateway::store::InMemoryRecordSource;

const BASE: &str = r#"
version: 1
database:
  name: "FinancialDashboard"
  collection: "fundamentals"
"#;

fn fixture() -> Vec<Document> {
    vec![
        doc! { "Ticker Symbol": "A", "Period Ending": "2013-12-31", "Net Income": 100.0, "Total Revenue": 1000.0, "Trading Activity": 40.0 },
        doc! { "Ticker Symbol": "A", "Period Ending": "2014-12-31", "Net Income": 200, "Total Revenue": 1000, "Trading Activity": 30 },
        doc! { "Ticker Symbol": "A", "Period Ending": "2015-12-31", "Net Income": 300.0, "Total Revenue": 1000.0, "Trading Activity": 20.0 },
        doc! { "Ticker Symbol": "B", "Period Ending": "2015-12-31", "Net Income": 10.0, "Total Revenue": 100.0, "Trading Activity": 50.0 },
    ]
}

fn app_with(extra_yaml: &str, source: InMemoryRecordSource) -> Router {
    let cfg = config::load_from_str(&format!("{BASE}{extra_yaml}")).unwrap();
    let source = source.with_policy(cfg.loader.on_malformed);
    let state = AppState::new(cfg, Arc::new(source)).unwrap();
    build_router(state)
}

fn app() -> Router {
    app_with("", InMemoryRecordSource::new(fixture()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn dummy_portfolio_ranks_and_sums() {
    let (status, body) = get_json(app(), "/dummy-portfolio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"dummy_portfolio": {"A": 3000.0, "B": 100.0}}));
}

#[tokio::test]
async fn dummy_portfolio_chart_variant() {
    let app = app_with("output:\n  portfolio: chart\n", InMemoryRecordSource::new(fixture()));
    let (status, body) = get_json(app, "/dummy-portfolio").await;
    assert_eq!(status, StatusCode::OK);
    let url = body["plot_url"].as_str().unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
    assert!(body.get("dummy_portfolio").is_none());
}

#[tokio::test]
async fn dummy_portfolio_chart_with_many_tickers() {
    let docs = (0..800)
        .map(|i| {
            let ticker = format!("T{i}");
            let net_income = i as f64;
            doc! { "Ticker Symbol": ticker, "Net Income": net_income, "Total Revenue": 10.0 }
        })
        .collect();
    let app = app_with(
        "analytics:\n  top_n: 1000\noutput:\n  portfolio: chart\n",
        InMemoryRecordSource::new(docs),
    );
    let (status, body) = get_json(app, "/dummy-portfolio").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["plot_url"].as_str().unwrap().starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn returns_volatility_rows() {
    let (status, body) = get_json(app(), "/returns-volatility").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], json!({"Ticker Symbol": "A", "Returns": 0.1, "Volatility": null}));
    assert_eq!(rows[3]["Ticker Symbol"], "B");
}

#[tokio::test]
async fn returns_volatility_zero_revenue() {
    let source = InMemoryRecordSource::new(vec![
        doc! { "Ticker Symbol": "Z", "Net Income": 5.0, "Total Revenue": 0.0 },
    ]);
    let (status, body) = get_json(app_with("", source), "/returns-volatility").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"Ticker Symbol": "Z", "Returns": "Infinity", "Volatility": null}]));
}

#[tokio::test]
async fn profit_projection_linear() {
    let (status, body) = get_json(app(), "/profit-projection").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"A": 400.0}));
}

#[tokio::test]
async fn heatmap_data_variant() {
    let (status, body) = get_json(app(), "/heatmap").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["heatmap_data"]["B"]["2015-12-31"], json!(50.0));
    assert_eq!(body["heatmap_data"]["B"]["2013-12-31"], json!(0.0));
    assert_eq!(body["heatmap_data"]["A"]["2014-12-31"], json!(30.0));
}

#[tokio::test]
async fn heatmap_encodes_unbounded_activity() {
    let source = InMemoryRecordSource::new(vec![
        doc! { "Ticker Symbol": "A", "Period Ending": "2015", "Trading Activity": f64::INFINITY },
    ]);
    let (status, body) = get_json(app_with("", source), "/heatmap").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"heatmap_data": {"A": {"2015": "Infinity"}}}));
}

#[tokio::test]
async fn heatmap_chart_variant() {
    let app = app_with("output:\n  heatmap: chart\n", InMemoryRecordSource::new(fixture()));
    let (status, body) = get_json(app, "/heatmap").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["plot_url"].as_str().unwrap().starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn most_traded_orders_by_activity() {
    let (status, body) = get_json(app(), "/most-traded").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["Ticker Symbol"], "B");
    assert_eq!(rows[0]["Trading Activity"], json!(50.0));
    assert_eq!(rows[3]["Period Ending"], "2015-12-31");
}

#[tokio::test]
async fn unreachable_store_is_503() {
    let app = app_with("", InMemoryRecordSource::unreachable());
    let (status, body) = get_json(app.clone(), "/heatmap").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "UNAVAILABLE");

    let (status, _) = get(app, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn malformed_records_skip_or_fail() {
    let mut docs = fixture();
    docs.push(doc! { "Net Income": 1.0e12 });

    let (status, body) = get_json(app_with("", InMemoryRecordSource::new(docs.clone())), "/dummy-portfolio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"dummy_portfolio": {"A": 3000.0, "B": 100.0}}));

    let app = app_with("loader:\n  on_malformed: fail\n", InMemoryRecordSource::new(docs));
    let (status, body) = get_json(app, "/dummy-portfolio").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "MALFORMED_DATA");
}

#[tokio::test]
async fn every_request_rescans() {
    let source = Arc::new(InMemoryRecordSource::new(fixture()));
    let cfg = config::load_from_str(BASE).unwrap();
    let state = AppState::new(cfg, source.clone()).unwrap();
    let app = build_router(state);

    let (_, before) = get_json(app.clone(), "/dummy-portfolio").await;
    assert_eq!(before["dummy_portfolio"]["A"], json!(3000.0));

    source.insert(doc! { "Ticker Symbol": "A", "Net Income": 1.0, "Total Revenue": 500.0 });
    let (_, after) = get_json(app, "/dummy-portfolio").await;
    assert_eq!(after["dummy_portfolio"]["A"], json!(3500.0));
}

#[tokio::test]
async fn ops_endpoints() {
    let app = app();

    let (status, body) = get(app.clone(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let (status, body) = get(app.clone(), "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ready");

    let (status, _) = get(app.clone(), "/profit-projection").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("finsight_http_requests_total{route=\"/profit-projection\",status=\"200\"} 1"));
    assert!(text.contains("finsight_records_loaded_total 4"));
    assert!(text.contains("finsight_draining 0"));
}
