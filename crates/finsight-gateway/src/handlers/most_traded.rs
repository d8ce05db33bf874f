use axum::{extract::State, Json};

use finsight_core::analytics::{self, TradedRow};

use crate::app_state::AppState;
use crate::error::ApiError;

use super::load_table;

/// `GET /most-traded`
pub async fn most_traded(State(state): State<AppState>) -> Result<Json<Vec<TradedRow>>, ApiError> {
    let table = load_table(&state).await?;
    Ok(Json(analytics::most_traded(&table, state.params().most_traded)))
}
