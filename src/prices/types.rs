use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One bunker price period as returned by the game API
///
/// Missing or `null` fields read as zero/empty; a zero price is never green.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSlot {
    /// Fuel price in $/t
    #[serde(default, deserialize_with = "null_as_default")]
    pub fuel_price: u32,
    /// CO2 certificate price in $/t
    #[serde(default, deserialize_with = "null_as_default")]
    pub co2_price: u32,
    /// Slot start, `HH:MM` on the half-hour grid (UTC)
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    /// Game day the slot belongs to
    #[serde(default, deserialize_with = "null_as_default")]
    pub day: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PriceSlot {
    pub fn slot_key(&self) -> SlotKey {
        SlotKey::new(&self.time, self.day)
    }
}

/// Identity of a price period across fetches, `"{time}-d{day}"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotKey(String);

impl SlotKey {
    pub fn new(time: &str, day: u32) -> Self {
        Self(format!("{}-d{}", time, day))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SlotKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Envelope of the `get-prices` response
#[derive(Debug, Deserialize)]
pub(crate) struct PriceResponse {
    pub data: PriceData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PriceData {
    #[serde(default)]
    pub prices: Vec<PriceSlot>,
}
