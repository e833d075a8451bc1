use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, ORIGIN, REFERER, USER_AGENT};

use crate::config::GameConfig;
use crate::error::{BunkerwatchError, Result};
use crate::logging::get_logger;
use crate::prices::types::{PriceResponse, PriceSlot};

const GAME_ORIGIN: &str = "https://shippingmanager.cc";
const PRICES_URL: &str = "https://shippingmanager.cc/api/bunker/get-prices";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/141.0.0.0 Safari/537.36";

/// Anything that can produce the current window of price slots
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current price window. The list may be empty and may not
    /// contain the slot for the current time.
    async fn fetch_prices(&self) -> Result<Vec<PriceSlot>>;
}

/// Shipping Manager bunker price endpoint
pub struct GameApiClient {
    http: reqwest::Client,
    session_token: String,
    game_version: String,
    logger: crate::logging::StructuredLogger,
}

impl GameApiClient {
    /// Create a client on top of a shared HTTP client (which carries the timeout)
    pub fn new(http: reqwest::Client, cfg: &GameConfig) -> Self {
        Self {
            http,
            session_token: cfg.session_token.clone(),
            game_version: cfg.game_version.clone(),
            logger: get_logger("prices"),
        }
    }
}

#[async_trait]
impl PriceSource for GameApiClient {
    async fn fetch_prices(&self) -> Result<Vec<PriceSlot>> {
        let resp = self
            .http
            .post(PRICES_URL)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json, text/plain, */*")
            .header("Game-Version", &self.game_version)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ORIGIN, GAME_ORIGIN)
            .header(REFERER, format!("{}/loading", GAME_ORIGIN))
            .header(
                COOKIE,
                format!("shipping_manager_session={}", self.session_token),
            )
            .body("")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            return Err(BunkerwatchError::api(format!(
                "API returned status {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            )));
        }

        let prices = parse_price_response(&body)?;
        self.logger
            .debug(&format!("Fetched {} price slots", prices.len()));
        Ok(prices)
    }
}

/// Decode a `get-prices` response body
pub fn parse_price_response(body: &[u8]) -> Result<Vec<PriceSlot>> {
    let parsed: PriceResponse = serde_json::from_slice(body).map_err(|e| {
        BunkerwatchError::serialization(format!(
            "failed to parse response: {} (body: {})",
            e,
            String::from_utf8_lossy(body)
        ))
    })?;
    Ok(parsed.data.prices)
}
