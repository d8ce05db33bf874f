use axum::{extract::State, Json};

use finsight_core::analytics::{self, Projections};

use crate::app_state::AppState;
use crate::error::ApiError;

use super::load_table;

/// `GET /profit-projection`
pub async fn profit_projection(
    State(state): State<AppState>,
) -> Result<Json<Projections>, ApiError> {
    let table = load_table(&state).await?;
    Ok(Json(analytics::profit_projection(&table, state.params().top_n)))
}
