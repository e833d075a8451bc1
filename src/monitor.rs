//! One price check cycle
//!
//! `PriceMonitor` is the context object built once at startup: it owns the
//! collaborators, the cooldown store and the in-memory cooldown state, and
//! is handed to the scheduler which calls [`PriceMonitor::run_check`].

use std::sync::Arc;

use crate::alert::{self, Decision, Thresholds};
use crate::cooldown::{CooldownState, CooldownStore, format_slot};
use crate::logging::get_logger;
use crate::prices::{PriceSource, SlotKey};
use crate::slot::{Clock, SystemClock, current_slot_time};
use crate::telegram::Notifier;
use crate::timezone::DisplayTimezone;

/// Result of a single check, mainly for logging and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Fetch failed or returned nothing; state untouched
    Skipped,
    /// No price at or below its threshold
    AboveThreshold,
    /// Green, but every green channel was already alerted for this slot
    AlreadyAlerted { slot: SlotKey },
    /// Message delivered for the listed channels
    Alerted { slot: SlotKey, fuel: bool, co2: bool },
    /// Delivery failed; cooldown left as it was so the next tick retries
    DeliveryFailed { slot: SlotKey },
}

/// Check-cycle context
pub struct PriceMonitor {
    source: Box<dyn PriceSource>,
    notifier: Box<dyn Notifier>,
    clock: Arc<dyn Clock>,
    store: CooldownStore,
    state: CooldownState,
    thresholds: Thresholds,
    chat_id: String,
    timezone: DisplayTimezone,
    logger: crate::logging::StructuredLogger,
}

impl PriceMonitor {
    /// Build the context and load the persisted cooldown state
    pub fn new(
        source: Box<dyn PriceSource>,
        notifier: Box<dyn Notifier>,
        store: CooldownStore,
        thresholds: Thresholds,
        chat_id: impl Into<String>,
    ) -> Self {
        let state = store.load();
        Self {
            source,
            notifier,
            clock: Arc::new(SystemClock),
            store,
            state,
            thresholds,
            chat_id: chat_id.into(),
            timezone: DisplayTimezone::Local,
            logger: get_logger("monitor"),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_timezone(mut self, timezone: DisplayTimezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn timezone(&self) -> DisplayTimezone {
        self.timezone
    }

    pub fn state(&self) -> &CooldownState {
        &self.state
    }

    /// Log what was restored from disk
    pub fn log_restored_state(&self) {
        self.logger.info(&format!(
            "Cooldown state loaded - last check: {}, last fuel slot: {}, last CO2 slot: {}",
            self.timezone.format_last_check(self.state.last_check),
            format_slot(self.state.last_fuel_slot.as_ref()),
            format_slot(self.state.last_co2_slot.as_ref()),
        ));
    }

    /// Fetch, decide, notify and persist. Never fails; every problem is
    /// logged and reflected in the outcome.
    pub async fn run_check(&mut self) -> CheckOutcome {
        let now = self.clock.now();
        self.logger.info(&format!(
            "Checking prices at {} ({})...",
            self.timezone.format(now, "%H:%M:%S"),
            self.timezone
        ));

        let prices = match self.source.fetch_prices().await {
            Ok(p) => p,
            Err(e) => {
                self.logger.error(&format!("Error fetching prices: {}", e));
                return CheckOutcome::Skipped;
            }
        };

        let slot_time = current_slot_time(now);
        let Some(decision) = alert::decide(&prices, &slot_time, &self.thresholds, &self.state)
        else {
            self.logger.warn("API returned empty price list");
            return CheckOutcome::Skipped;
        };

        if !decision.exact_match {
            self.logger.warn(&format!(
                "No price found for time slot {}, using last available slot {} (day {})",
                slot_time, decision.matched.time, decision.matched.day
            ));
        }

        self.logger.info(&format!(
            "Current prices - Fuel: ${}/t, CO2: ${}/t (slot: {}, day: {})",
            decision.matched.fuel_price,
            decision.matched.co2_price,
            decision.matched.time,
            decision.matched.day
        ));

        self.state.last_check = Some(now);
        let outcome = self.deliver(&decision).await;
        self.store.save(&self.state);
        outcome
    }

    async fn deliver(&mut self, decision: &Decision) -> CheckOutcome {
        let slot = decision.slot_key.clone();

        if !decision.any_green() {
            self.logger.info("Prices above threshold, no alert needed");
            return CheckOutcome::AboveThreshold;
        }

        let Some(message) = decision.message() else {
            self.logger.info(&format!(
                "Prices are green but already alerted for slot {}",
                slot
            ));
            return CheckOutcome::AlreadyAlerted { slot };
        };

        if let Err(e) = self.notifier.send(&self.chat_id, &message).await {
            self.logger
                .error(&format!("Error sending Telegram alert: {}", e));
            return CheckOutcome::DeliveryFailed { slot };
        }

        self.state.record_delivery(decision);
        if decision.fire_fuel {
            self.logger.info(&format!(
                "Fuel alert sent (${}/t <= ${}/t threshold, slot {})",
                decision.matched.fuel_price, self.thresholds.fuel, slot
            ));
        }
        if decision.fire_co2 {
            self.logger.info(&format!(
                "CO2 alert sent (${}/t <= ${}/t threshold, slot {})",
                decision.matched.co2_price, self.thresholds.co2, slot
            ));
        }

        CheckOutcome::Alerted {
            slot,
            fuel: decision.fire_fuel,
            co2: decision.fire_co2,
        }
    }
}
