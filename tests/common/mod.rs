#![allow(dead_code)]

use async_trait::async_trait;
use bunkerwatch::error::{BunkerwatchError, Result};
use bunkerwatch::prices::{PriceSlot, PriceSource};
use bunkerwatch::slot::Clock;
use bunkerwatch::telegram::Notifier;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn slot(fuel: u32, co2: u32, time: &str, day: u32) -> PriceSlot {
    PriceSlot {
        fuel_price: fuel,
        co2_price: co2,
        time: time.to_string(),
        day,
    }
}

pub fn utc(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
}

/// Price source returning a configurable window; `None` simulates a fetch error
#[derive(Clone, Default)]
pub struct FakeSource {
    prices: Arc<Mutex<Option<Vec<PriceSlot>>>>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn with(prices: Vec<PriceSlot>) -> Self {
        let source = Self::default();
        source.set(Some(prices));
        source
    }

    pub fn set(&self, prices: Option<Vec<PriceSlot>>) {
        *self.prices.lock().unwrap() = prices;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for FakeSource {
    async fn fetch_prices(&self) -> Result<Vec<PriceSlot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prices
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| BunkerwatchError::network("connection refused"))
    }
}

/// Notifier recording every message; can be switched to fail
#[derive(Clone, Default)]
pub struct FakeNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: Arc<AtomicBool>,
}

impl FakeNotifier {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BunkerwatchError::notification("Bad Request: chat not found"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

/// Clock pinned to a settable instant
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(now)))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}
