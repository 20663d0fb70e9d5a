use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::models::Action;

/// Install the Prometheus recorder and pre-register the bot's metrics.
/// The returned handle renders the scrape payload for `/metrics`.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear before the first increment.
    counter!("updates_received_total").absolute(0);
    counter!("withdrawals_completed_total").absolute(0);
    counter!("invalid_addresses_total").absolute(0);
    counter!("handler_errors_total").absolute(0);
    for action in Action::ALL {
        counter!("callback_actions_total", "action" => action.callback_data()).absolute(0);
    }

    gauge!("dialogues_awaiting_address").set(0.0);

    Ok(handle)
}
