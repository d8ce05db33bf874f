use axum::{extract::State, Json};

use finsight_core::analytics::{self, ReturnsRow};

use crate::app_state::AppState;
use crate::error::ApiError;

use super::load_table;

/// `GET /returns-volatility`
pub async fn returns_volatility(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReturnsRow>>, ApiError> {
    let table = load_table(&state).await?;
    Ok(Json(analytics::returns_volatility(&table, state.params())))
}
