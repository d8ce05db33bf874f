use axum::{extract::State, Json};
use serde::Serialize;

use finsight_core::analytics::{self, Portfolio};

use crate::app_state::AppState;
use crate::config::OutputMode;
use crate::error::ApiError;
use crate::render;

use super::load_table;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PortfolioResponse {
    Data { dummy_portfolio: Portfolio },
    Chart { plot_url: String },
}

/// `GET /dummy-portfolio`
pub async fn dummy_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let table = load_table(&state).await?;
    let portfolio = analytics::revenue_by_top_ticker(&table, state.params().top_n);

    let body = match state.cfg().output.portfolio {
        OutputMode::Data => PortfolioResponse::Data { dummy_portfolio: portfolio },
        OutputMode::Chart => {
            let series: Vec<(String, f64)> =
                portfolio.into_iter().map(|(t, v)| (t, v.value())).collect();
            let plot_url = render::to_data_uri(&render::render_bar_chart(&series))?;
            state.metrics().charts_rendered.inc(&[("chart", "portfolio")]);
            PortfolioResponse::Chart { plot_url }
        }
    };
    Ok(Json(body))
}
