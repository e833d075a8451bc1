//! Alert decision logic
//!
//! Pure functions deciding which channels (fuel, CO2) fire for a fetched
//! price window. Delivery and persistence live in [`crate::monitor`].

use crate::cooldown::CooldownState;
use crate::prices::{PriceSlot, SlotKey};

/// Alert thresholds in $/t; a price at or below its threshold is green
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub fuel: u32,
    pub co2: u32,
}

/// Green means a positive price at or below the threshold. Zero is treated
/// as missing data.
pub fn is_green(price: u32, threshold: u32) -> bool {
    price > 0 && price <= threshold
}

/// Outcome of evaluating one price window against thresholds and cooldown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Slot the decision was made for
    pub matched: PriceSlot,

    /// Identity of `matched`
    pub slot_key: SlotKey,

    /// False when no slot matched the current time and the last one was used
    pub exact_match: bool,

    pub fuel_green: bool,
    pub co2_green: bool,

    /// Green and not yet alerted for this slot
    pub fire_fuel: bool,
    pub fire_co2: bool,
}

impl Decision {
    pub fn any_green(&self) -> bool {
        self.fuel_green || self.co2_green
    }

    #[cfg(test)]
    fn any_fire(&self) -> bool {
        self.fire_fuel || self.fire_co2
    }

    /// Telegram message for the channels that fire, `None` if nothing fires
    pub fn message(&self) -> Option<String> {
        match (self.fire_fuel, self.fire_co2) {
            (true, true) => Some(both_green_message(
                self.matched.fuel_price,
                self.matched.co2_price,
            )),
            (true, false) => Some(fuel_message(self.matched.fuel_price)),
            (false, true) => Some(co2_message(self.matched.co2_price)),
            (false, false) => None,
        }
    }
}

/// Pick the slot for `current_slot_time`, falling back to the last entry.
/// Returns the slot and whether it was an exact match.
pub fn select_slot<'a>(
    prices: &'a [PriceSlot],
    current_slot_time: &str,
) -> Option<(&'a PriceSlot, bool)> {
    prices
        .iter()
        .find(|p| p.time == current_slot_time)
        .map(|p| (p, true))
        .or_else(|| prices.last().map(|p| (p, false)))
}

/// Decide which channels fire. `None` only for an empty price window.
pub fn decide(
    prices: &[PriceSlot],
    current_slot_time: &str,
    thresholds: &Thresholds,
    state: &CooldownState,
) -> Option<Decision> {
    let (matched, exact_match) = select_slot(prices, current_slot_time)?;
    let slot_key = matched.slot_key();

    let fuel_green = is_green(matched.fuel_price, thresholds.fuel);
    let co2_green = is_green(matched.co2_price, thresholds.co2);

    let fire_fuel = fuel_green && state.last_fuel_slot.as_ref() != Some(&slot_key);
    let fire_co2 = co2_green && state.last_co2_slot.as_ref() != Some(&slot_key);

    Some(Decision {
        matched: matched.clone(),
        slot_key,
        exact_match,
        fuel_green,
        co2_green,
        fire_fuel,
        fire_co2,
    })
}

pub fn both_green_message(fuel_price: u32, co2_price: u32) -> String {
    format!(
        "*Great news, Captain!*\n\nBoth fuel and CO2 prices are looking fantastic right now!\n\nFuel: *${}/t*\nCO2: *${}/t*\n\nTime to stock up!",
        fuel_price, co2_price
    )
}

pub fn fuel_message(fuel_price: u32) -> String {
    format!(
        "*Ahoy, Captain!*\n\nFuel prices have dropped to a great level!\n\nFuel: *${}/t*\n\nMight be a good time to fill up your tanks!",
        fuel_price
    )
}

pub fn co2_message(co2_price: u32) -> String {
    format!(
        "*Ahoy, Captain!*\n\nCO2 certificate prices are looking good!\n\nCO2: *${}/t*\n\nA fine opportunity to stock up on certificates!",
        co2_price
    )
}
