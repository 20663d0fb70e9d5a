use std::net::SocketAddr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use teloxide::update_listeners::webhooks;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HMAC computation failed: {0}")]
    HmacError(String),
}

/// Webhook path and secret, both derived from the bot token so the token
/// itself never shows up in URLs or access logs. Telegram echoes the secret
/// in `X-Telegram-Bot-Api-Secret-Token` and teloxide's webhook listener
/// rejects deliveries without it.
#[derive(Debug, Clone)]
pub struct WebhookAuth {
    pub path_segment: String,
    pub secret_token: String,
}

impl WebhookAuth {
    pub fn from_bot_token(bot_token: &str) -> Result<Self, AuthError> {
        Ok(Self {
            path_segment: derive(bot_token, "webhook-path")?,
            secret_token: derive(bot_token, "webhook-secret")?,
        })
    }

    /// Route the webhook is served on, e.g. `/webhook/<segment>`.
    pub fn route_path(&self) -> String {
        format!("/webhook/{}", self.path_segment)
    }

    /// Public URL registered with `setWebhook`.
    pub fn webhook_url(&self, public_base: &str) -> String {
        format!("{}{}", public_base.trim_end_matches('/'), self.route_path())
    }

    /// Options for teloxide's axum webhook listener: the derived path on
    /// `address`, registered with Telegram together with the secret.
    pub fn listener_options(
        &self,
        address: SocketAddr,
        public_base: &str,
    ) -> anyhow::Result<webhooks::Options> {
        let url = self.webhook_url(public_base).parse()?;
        Ok(webhooks::Options::new(address, url).secret_token(self.secret_token.clone()))
    }
}

/// HMAC-SHA256(token, label), URL-safe base64 without padding. The
/// alphabet matches what Telegram allows in `secret_token`.
fn derive(bot_token: &str, label: &str) -> Result<String, AuthError> {
    let mut mac = HmacSha256::new_from_slice(bot_token.as_bytes())
        .map_err(|e| AuthError::HmacError(e.to_string()))?;
    mac.update(label.as_bytes());
    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_stable_and_hides_token() {
        let a = WebhookAuth::from_bot_token("123456:SECRET-token").unwrap();
        let b = WebhookAuth::from_bot_token("123456:SECRET-token").unwrap();
        assert_eq!(a.path_segment, b.path_segment);
        assert_ne!(a.path_segment, a.secret_token);
        assert!(!a.route_path().contains("SECRET"));

        // 32 bytes -> 43 base64 chars without padding
        assert_eq!(a.secret_token.len(), 43);
        assert!(a
            .secret_token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_different_tokens_differ() {
        let a = WebhookAuth::from_bot_token("1:a").unwrap();
        let b = WebhookAuth::from_bot_token("1:b").unwrap();
        assert_ne!(a.path_segment, b.path_segment);
    }

    #[test]
    fn test_webhook_url() {
        let auth = WebhookAuth::from_bot_token("1:a").unwrap();
        assert_eq!(
            auth.webhook_url("https://bot.example.com/"),
            format!("https://bot.example.com/webhook/{}", auth.path_segment)
        );
        assert_eq!(
            auth.webhook_url("https://bot.example.com"),
            auth.webhook_url("https://bot.example.com/")
        );
    }

    #[test]
    fn test_listener_options_serve_derived_path() {
        let auth = WebhookAuth::from_bot_token("1:a").unwrap();
        let address: SocketAddr = "127.0.0.1:8443".parse().unwrap();
        let options = auth
            .listener_options(address, "https://bot.example.com")
            .unwrap();

        assert_eq!(options.path, auth.route_path());
        assert_eq!(options.secret_token.as_deref(), Some(auth.secret_token.as_str()));
        assert!(!options.url.as_str().contains("1:a"));

        assert!(auth.listener_options(address, "not a url").is_err());
    }
}
