use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and which upstream credentials are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "job-assistant-api",
        "ai_gateway_configured": state.config.ai_gateway_api_key.is_some(),
        "data_service_configured": state.listings.is_some(),
    }))
}
