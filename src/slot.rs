//! Price slot clock
//!
//! Prices change on fixed UTC half-hour boundaries. Checks run one minute
//! after each boundary (at :01 and :31) so the game has rolled prices over
//! before we poll.

use chrono::{DateTime, Duration as ChronoDuration, Timelike, Utc};
use std::time::Duration;

/// Length of one price slot, and therefore the repeating check interval
pub const CHECK_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Source of the current UTC instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Slot label (`"HH:00"` or `"HH:30"`) containing `now`
pub fn current_slot_time(now: DateTime<Utc>) -> String {
    let minute = if now.minute() < 30 { "00" } else { "30" };
    format!("{:02}:{}", now.hour(), minute)
}

/// Next scheduled check: minute 01 or 31, strictly after `now`
pub fn next_boundary(now: DateTime<Utc>) -> DateTime<Utc> {
    let into_hour = ChronoDuration::seconds(i64::from(now.minute() * 60 + now.second()))
        + ChronoDuration::nanoseconds(i64::from(now.nanosecond()));
    let hour_start = now - into_hour;

    let offset_minutes = match now.minute() {
        0 => 1,
        m if m < 31 => 31,
        _ => 61,
    };
    hour_start + ChronoDuration::minutes(offset_minutes)
}

/// Time left until [`next_boundary`]
pub fn wait_until_next_boundary(now: DateTime<Utc>) -> Duration {
    (next_boundary(now) - now).to_std().unwrap_or(Duration::ZERO)
}
