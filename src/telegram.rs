//! Telegram delivery
//!
//! Alerts go to a single chat through the Bot API `sendMessage` call with
//! Markdown parsing enabled.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::TelegramConfig;
use crate::error::{BunkerwatchError, Result};
use crate::logging::get_logger;

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Delivers a formatted message to one destination
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()>;
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: String,
}

/// Telegram Bot API client
pub struct TelegramNotifier {
    http: reqwest::Client,
    bot_token: String,
    logger: crate::logging::StructuredLogger,
}

impl TelegramNotifier {
    pub fn new(http: reqwest::Client, cfg: &TelegramConfig) -> Self {
        Self {
            http,
            bot_token: cfg.bot_token.clone(),
            logger: get_logger("telegram"),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        let payload = json!({
            "chat_id": normalize_chat_id(chat_id),
            "text": text,
            "parse_mode": "Markdown",
        });

        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API, self.bot_token);
        let body = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await?
            .bytes()
            .await?;

        check_response(&body)?;
        self.logger.info("Telegram message sent successfully");
        Ok(())
    }
}

/// Group chat ids are negative; a purely numeric id is assumed to have lost
/// its sign and gets `-` prepended
pub fn normalize_chat_id(chat_id: &str) -> String {
    if !chat_id.is_empty() && chat_id.chars().all(|c| c.is_ascii_digit()) {
        format!("-{}", chat_id)
    } else {
        chat_id.to_string()
    }
}

/// Interpret a `sendMessage` response body
fn check_response(body: &[u8]) -> Result<()> {
    let resp: TelegramResponse = serde_json::from_slice(body).map_err(|e| {
        BunkerwatchError::notification(format!("failed to parse Telegram response: {}", e))
    })?;
    if resp.ok {
        Ok(())
    } else {
        Err(BunkerwatchError::notification(format!(
            "Telegram API error: {}",
            resp.description
        )))
    }
}
