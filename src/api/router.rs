use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

/// Operational routes plus, in webhook mode, the router teloxide built for
/// Telegram deliveries (pass `Router::new()` when polling).
pub fn create_router(state: AppState, webhook: Router) -> Router {
    Router::new()
        .route("/health", get(handlers::ops::health_check))
        .route("/metrics", get(handlers::ops::render_metrics))
        .with_state(state)
        .merge(webhook)
        .layer(TraceLayer::new_for_http())
}
