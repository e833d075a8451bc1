//! Configuration management for Bunkerwatch
//!
//! Settings come from a `.env`-style `KEY=VALUE` file that lives next to the
//! executable (or in the working directory). The configuration is loaded
//! once before the scheduler starts and is immutable afterwards.

use crate::alert::Thresholds;
use crate::error::{BunkerwatchError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the settings file
pub const ENV_FILE_NAME: &str = ".env";

const REQUIRED_KEYS: [&str; 5] = [
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_CHAT_ID",
    "SESSION_TOKEN",
    "FUEL_THRESHOLD",
    "CO2_THRESHOLD",
];

/// Main configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Telegram bot credentials and destination
    pub telegram: TelegramConfig,

    /// Game API session
    pub game: GameConfig,

    /// Alert thresholds in $/t
    pub thresholds: Thresholds,

    /// Display timezone (abbreviation or IANA name, empty = system local)
    pub timezone: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Default)]
pub struct TelegramConfig {
    pub bot_token: String,

    /// Chat id as written in the file; numeric-only ids are prefixed with
    /// `-` at send time
    pub chat_id: String,
}

/// Shipping Manager API settings
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Value of the `shipping_manager_session` cookie
    pub session_token: String,

    /// `Game-Version` header expected by the API
    pub game_version: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Log file or directory; empty disables file logging
    pub file: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session_token: String::new(),
            game_version: "1.0.313".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: String::new(),
            backup_count: 7,
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from a `.env` file
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_vars(&read_env_file(path)?)
    }

    /// Build and validate configuration from parsed key/value pairs
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        for key in REQUIRED_KEYS {
            if vars.get(key).is_none_or(|v| v.is_empty()) {
                return Err(BunkerwatchError::config(format!(
                    "missing required .env value: {}",
                    key
                )));
            }
        }

        let get = |key: &str| vars.get(key).cloned().unwrap_or_default();
        let defaults = Config::default();

        let config = Config {
            telegram: TelegramConfig {
                bot_token: get("TELEGRAM_BOT_TOKEN"),
                chat_id: get("TELEGRAM_CHAT_ID"),
            },
            game: GameConfig {
                session_token: get("SESSION_TOKEN"),
                game_version: non_empty(get("GAME_VERSION"))
                    .unwrap_or(defaults.game.game_version),
            },
            thresholds: Thresholds {
                fuel: parse_threshold("FUEL_THRESHOLD", &get("FUEL_THRESHOLD"))?,
                co2: parse_threshold("CO2_THRESHOLD", &get("CO2_THRESHOLD"))?,
            },
            timezone: get("TIMEZONE"),
            logging: LoggingConfig {
                level: non_empty(get("LOG_LEVEL")).unwrap_or(defaults.logging.level),
                file: get("LOG_FILE"),
                backup_count: defaults.logging.backup_count,
                json_format: parse_bool(&get("LOG_JSON")),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(BunkerwatchError::validation(
                "TELEGRAM_BOT_TOKEN",
                "Bot token cannot be empty",
            ));
        }

        if self.telegram.chat_id.trim().is_empty() {
            return Err(BunkerwatchError::validation(
                "TELEGRAM_CHAT_ID",
                "Chat id cannot be empty",
            ));
        }

        if self.game.session_token.trim().is_empty() {
            return Err(BunkerwatchError::validation(
                "SESSION_TOKEN",
                "Session token cannot be empty",
            ));
        }

        crate::logging::parse_log_level(&self.logging.level)
            .map_err(|_| BunkerwatchError::validation("LOG_LEVEL", "Unknown log level"))?;

        Ok(())
    }
}

/// Locate the settings file: executable directory first, then working directory
pub fn find_env_file() -> Option<PathBuf> {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(ENV_FILE_NAME)));

    beside_exe
        .into_iter()
        .chain(std::iter::once(PathBuf::from(ENV_FILE_NAME)))
        .find(|p| p.is_file())
}

/// Read the key/value pairs of a `.env` file without touching the process
/// environment
pub fn read_env_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    let to_config_error = |e: dotenvy::Error| {
        BunkerwatchError::config(format!("failed to read {}: {}", path.display(), e))
    };

    dotenvy::from_path_iter(path)
        .map_err(to_config_error)?
        .map(|item| {
            item.map(|(k, v)| (k, v.trim_end().to_string()))
                .map_err(to_config_error)
        })
        .collect()
}

fn parse_threshold(key: &str, raw: &str) -> Result<u32> {
    raw.parse::<u32>().map_err(|e| {
        BunkerwatchError::validation(key, format!("must be a non-negative number: {}", e))
    })
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
