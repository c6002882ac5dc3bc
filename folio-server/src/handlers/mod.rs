use axum::Json;
use serde_json::{Value, json};

use crate::infra::errors::AppError;

pub mod portfolio;

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Any other `/api/*` path.
pub async fn api_not_found() -> AppError {
    AppError::not_found("Not found")
}
