pub mod api;
pub mod bot;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod simulation;
pub mod state;

use crate::config::AppConfig;
use crate::state::DialogueStore;

/// Shared state of the operational HTTP routes.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub dialogues: DialogueStore,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
