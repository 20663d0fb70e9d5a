use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use teloxide::prelude::*;
use teloxide::update_listeners::{webhooks, Polling};
use teloxide::utils::command::BotCommands;

use ethdemo_bot::api::{create_router, WebhookAuth};
use ethdemo_bot::bot::dispatch::build_dispatcher;
use ethdemo_bot::bot::DemoBot;
use ethdemo_bot::config::AppConfig;
use ethdemo_bot::models::Command;
use ethdemo_bot::simulation::RngSource;
use ethdemo_bot::state::dialogue::run_dialogue_sweeper;
use ethdemo_bot::state::DialogueStore;
use ethdemo_bot::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let metrics_handle = ethdemo_bot::metrics::init_metrics()?;

    let bot = Bot::new(&config.bot_token).set_api_url(config.telegram_api_url.parse()?);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(error = %e, "Failed to register bot commands");
    }

    // --- Dialogue state, with optional expiry ---
    let dialogues = DialogueStore::new(config.dialogue_ttl());
    if let Some(ttl) = config.dialogue_ttl() {
        let sweep_every = (ttl / 2).max(Duration::from_secs(1));
        tokio::spawn(run_dialogue_sweeper(dialogues.clone(), sweep_every));
        tracing::info!(ttl_secs = ttl.as_secs(), "Withdrawal dialogues expire");
    }

    let demo = Arc::new(DemoBot::new(
        Arc::new(bot.clone()),
        Box::new(RngSource::from_entropy()),
        dialogues.clone(),
        config.explorer_host.clone(),
    ));
    let mut dispatcher = build_dispatcher(bot.clone(), demo);

    let addr = config.bind_addr()?;
    let state = AppState {
        config: config.clone(),
        dialogues,
        metrics_handle,
    };
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {addr}");

    match config.webhook_url.as_deref() {
        Some(public_base) => {
            let options = WebhookAuth::from_bot_token(&config.bot_token)?
                .listener_options(addr, public_base)?;

            // Registers the webhook with Telegram and deletes it on shutdown
            let (updates, stop_flag, webhook_routes) =
                webhooks::axum_to_router(bot.clone(), options).await?;
            tracing::info!(base = %public_base, "Webhook registered");

            let app = create_router(state, webhook_routes);
            tokio::spawn(async move {
                if let Err(e) = axum::serve(listener, app)
                    .with_graceful_shutdown(stop_flag)
                    .await
                {
                    tracing::error!(error = %e, "HTTP server failed");
                }
            });

            dispatcher
                .dispatch_with_listener(
                    updates,
                    LoggingErrorHandler::with_custom_text("An error from the webhook listener"),
                )
                .await;
        }
        None => {
            tracing::info!("No WEBHOOK_URL set, running in polling mode");

            let app = create_router(state, Router::new());
            tokio::spawn(async move {
                if let Err(e) = axum::serve(listener, app).await {
                    tracing::error!(error = %e, "HTTP server failed");
                }
            });

            // Polling removes a leftover webhook before the first getUpdates
            let updates = Polling::builder(bot)
                .timeout(config.poll_timeout())
                .build();
            dispatcher
                .dispatch_with_listener(
                    updates,
                    LoggingErrorHandler::with_custom_text("An error from the polling listener"),
                )
                .await;
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();
}
