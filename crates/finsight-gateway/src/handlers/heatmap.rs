use axum::{extract::State, Json};
use serde::Serialize;

use finsight_core::analytics::{self, HeatmapMatrix};

use crate::app_state::AppState;
use crate::config::OutputMode;
use crate::error::ApiError;
use crate::render;

use super::load_table;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HeatmapResponse {
    Data { heatmap_data: HeatmapMatrix },
    Chart { plot_url: String },
}

/// `GET /heatmap`
pub async fn heatmap(State(state): State<AppState>) -> Result<Json<HeatmapResponse>, ApiError> {
    let table = load_table(&state).await?;
    let matrix = analytics::trading_heatmap(&table, state.params().heatmap_rows);

    let body = match state.cfg().output.heatmap {
        OutputMode::Data => HeatmapResponse::Data { heatmap_data: matrix },
        OutputMode::Chart => {
            let plot_url = render::to_data_uri(&render::render_heatmap(&matrix))?;
            state.metrics().charts_rendered.inc(&[("chart", "heatmap")]);
            HeatmapResponse::Chart { plot_url }
        }
    };
    Ok(Json(body))
}
