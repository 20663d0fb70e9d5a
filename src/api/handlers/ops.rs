use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// GET /health: transport mode and open withdrawal dialogues.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mode = if state.config.is_webhook_mode() {
        "webhook"
    } else {
        "polling"
    };

    Json(json!({
        "status": "healthy",
        "mode": mode,
        "awaiting_address": state.dialogues.awaiting_count().await,
    }))
}

/// GET /metrics: Prometheus scrape payload.
pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics_handle.render(),
    )
}
