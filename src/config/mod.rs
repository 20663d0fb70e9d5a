use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_EXPLORER_HOST: &str = "etherscan.io";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub host: String,
    pub port: u16,

    // Public base URL; webhook mode when set, long polling otherwise
    pub webhook_url: Option<String>,

    pub telegram_api_url: String,
    pub explorer_host: String,
    pub poll_timeout_secs: u64,

    // Withdrawal dialogue lifetime; unset keeps dialogues until answered
    pub dialogue_ttl_secs: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let webhook_url = env::var("WEBHOOK_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .map_err(|_| anyhow::anyhow!("TELEGRAM_BOT_TOKEN must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8443".into())
                .parse()?,
            webhook_url,

            telegram_api_url: env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.into()),
            explorer_host: env::var("EXPLORER_HOST")
                .unwrap_or_else(|_| DEFAULT_EXPLORER_HOST.into()),
            poll_timeout_secs: env::var("POLL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),

            dialogue_ttl_secs: env::var("DIALOGUE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0),
        })
    }

    /// Returns true when updates arrive through a webhook instead of polling.
    pub fn is_webhook_mode(&self) -> bool {
        self.webhook_url.is_some()
    }

    pub fn dialogue_ttl(&self) -> Option<Duration> {
        self.dialogue_ttl_secs.map(Duration::from_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
