//! HTTP mapping for `FinsightError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use finsight_core::error::FinsightError;

/// Handler error: a core error rendered as `{"error": CODE, "message": ...}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub FinsightError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            FinsightError::BadRequest(_) | FinsightError::UnsupportedVersion => {
                StatusCode::BAD_REQUEST
            }
            FinsightError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            FinsightError::MalformedRecord { .. }
            | FinsightError::Render(_)
            | FinsightError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
