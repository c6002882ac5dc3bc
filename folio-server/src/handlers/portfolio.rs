use axum::{Json, extract::State};
use serde_json::Value;
use tracing::error;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

pub const PORTFOLIO_ERROR: &str = "Failed to load portfolio data";

/// `GET /api/portfolio`
///
/// Upstream failures never reach this layer; only a document that cannot
/// be serialized turns into a 500.
pub async fn get_portfolio(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let document = state.portfolio.build_document().await;
    let body = serde_json::to_value(&document).map_err(|err| {
        error!(error = %err, "failed to serialize portfolio document");
        AppError::internal(PORTFOLIO_ERROR)
    })?;
    Ok(Json(body))
}
