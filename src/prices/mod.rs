//! Shipping Manager bunker price source
//!
//! The game exposes a single endpoint returning the recent window of
//! half-hourly fuel and CO2 prices. It authenticates with the browser
//! session cookie.

pub mod client;
pub mod types;

pub use client::{GameApiClient, PriceSource, parse_price_response};
pub use types::{PriceSlot, SlotKey};
