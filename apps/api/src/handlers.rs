use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use uni_map_core::BackendRecord;

use crate::error::ApiError;
use crate::openalex::{clean_institutions, DebugSummary, DEBUG_PER_PAGE};
use crate::state::AppState;

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// GET /universities
pub async fn universities_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BackendRecord>>, ApiError> {
    let results = state.source.institutions(state.per_page).await?;
    let records = clean_institutions(&results);
    info!(
        fetched = results.len(),
        located = records.len(),
        "serving universities"
    );
    Ok(Json(records))
}

/// GET /universities_debug
pub async fn universities_debug_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DebugSummary>, ApiError> {
    let results = state.source.institutions(DEBUG_PER_PAGE).await?;
    Ok(Json(DebugSummary::from_results(&results)))
}
