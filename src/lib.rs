//! # Bunkerwatch - bunker price alerts for Shipping Manager
//!
//! Polls the game's bunker price API every half hour and sends a Telegram
//! message when fuel or CO2 prices drop to or below configured thresholds,
//! at most once per price slot per channel, across restarts.
//!
//! ## Architecture
//!
//! - `slot`: half-hour slot labels and the :01/:31 check boundaries
//! - `prices`: game API client and price slot types
//! - `alert`: pure alert decision and message wording
//! - `cooldown`: persisted last-alerted slots
//! - `telegram`: Bot API notifier
//! - `monitor`: one fetch/decide/notify/persist cycle
//! - `scheduler`: startup check, boundary alignment, 30 minute ticks
//! - `config`: `.env` settings
//! - `timezone`: display timezone resolution
//! - `logging`: structured logging and tracing

pub mod alert;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod prices;
pub mod scheduler;
pub mod slot;
pub mod telegram;
pub mod timezone;

// Re-export commonly used types
pub use config::Config;
pub use error::{BunkerwatchError, Result};
pub use monitor::{CheckOutcome, PriceMonitor};
pub use scheduler::Scheduler;
