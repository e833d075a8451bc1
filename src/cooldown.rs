//! Cooldown persistence
//!
//! Remembers the last slot alerted per channel so a restart inside the same
//! slot does not alert twice. The file is small JSON next to the executable
//! and is rewritten in full after every completed check.

use crate::alert::Decision;
use crate::error::Result;
use crate::logging::get_logger;
use crate::prices::SlotKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the cooldown store
pub const COOLDOWN_FILE_NAME: &str = ".cooldown";

/// Last alerted slot per channel plus the time of the last completed check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooldownState {
    pub last_fuel_slot: Option<SlotKey>,
    pub last_co2_slot: Option<SlotKey>,
    pub last_check: Option<DateTime<Utc>>,
}

impl CooldownState {
    /// Mark the channels of a delivered alert as done for its slot
    pub fn record_delivery(&mut self, decision: &Decision) {
        if decision.fire_fuel {
            self.last_fuel_slot = Some(decision.slot_key.clone());
        }
        if decision.fire_co2 {
            self.last_co2_slot = Some(decision.slot_key.clone());
        }
    }
}

/// On-disk shape. Empty strings are accepted as "unset" for files written
/// by older versions.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CooldownFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_fuel_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_co2_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_check: Option<String>,
}

impl From<&CooldownState> for CooldownFile {
    fn from(state: &CooldownState) -> Self {
        Self {
            last_fuel_slot: state.last_fuel_slot.as_ref().map(ToString::to_string),
            last_co2_slot: state.last_co2_slot.as_ref().map(ToString::to_string),
            last_check: state.last_check.map(|t| t.to_rfc3339()),
        }
    }
}

/// File-backed cooldown store
pub struct CooldownStore {
    file_path: PathBuf,
    logger: crate::logging::StructuredLogger,
}

impl CooldownStore {
    /// Create a store at an explicit path
    pub fn new<P: Into<PathBuf>>(file_path: P) -> Self {
        Self {
            file_path: file_path.into(),
            logger: get_logger("cooldown"),
        }
    }

    /// Store next to the running executable, or `.cooldown` in the working
    /// directory when the executable path is unknown
    pub fn beside_executable() -> Self {
        let path = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(COOLDOWN_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(COOLDOWN_FILE_NAME));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load state from disk. Never fails: a missing, unreadable or corrupt
    /// file yields an empty state.
    pub fn load(&self) -> CooldownState {
        if !self.file_path.exists() {
            self.logger.info("No cooldown file found, starting fresh");
            return CooldownState::default();
        }

        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(c) => c,
            Err(e) => {
                self.logger.warn(&format!(
                    "Failed to read {}: {}",
                    self.file_path.display(),
                    e
                ));
                return CooldownState::default();
            }
        };

        let file: CooldownFile = match serde_json::from_str(&contents) {
            Ok(f) => f,
            Err(e) => {
                self.logger
                    .warn(&format!("Failed to parse cooldown file: {}", e));
                return CooldownState::default();
            }
        };

        let last_check = file.last_check.as_deref().filter(|s| !s.is_empty()).and_then(|s| {
            match DateTime::parse_from_rfc3339(s) {
                Ok(t) => Some(t.with_timezone(&Utc)),
                Err(e) => {
                    self.logger
                        .warn(&format!("Ignoring invalid last_check '{}': {}", s, e));
                    None
                }
            }
        });

        self.logger.debug("Loaded cooldown state from disk");
        CooldownState {
            last_fuel_slot: slot_from_file(file.last_fuel_slot),
            last_co2_slot: slot_from_file(file.last_co2_slot),
            last_check,
        }
    }

    /// Save state to disk, logging instead of failing
    pub fn save(&self, state: &CooldownState) {
        if let Err(e) = self.try_save(state) {
            self.logger
                .warn(&format!("Failed to save cooldown file: {}", e));
        }
    }

    /// Save state to disk: write a sibling temp file, then rename over the
    /// target so a crash never leaves a truncated file
    pub fn try_save(&self, state: &CooldownState) -> Result<()> {
        let contents = serde_json::to_string(&CooldownFile::from(state))?;
        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, contents)?;
        std::fs::rename(&tmp_path, &self.file_path)?;
        self.logger.debug("Saved cooldown state to disk");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| COOLDOWN_FILE_NAME.into());
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

fn slot_from_file(raw: Option<String>) -> Option<SlotKey> {
    raw.filter(|s| !s.is_empty()).map(SlotKey::from)
}

/// Slot for log lines, `"none"` when unset
pub fn format_slot(slot: Option<&SlotKey>) -> String {
    slot.map_or_else(|| "none".to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store_in(dir: &tempfile::TempDir) -> CooldownStore {
        CooldownStore::new(dir.path().join(COOLDOWN_FILE_NAME))
    }

    #[test]
    fn missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load(), CooldownState::default());
    }

    #[test]
    fn corrupt_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), CooldownState::default());
    }

    #[test]
    fn empty_strings_are_unset() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"{"last_fuel_slot":"","last_co2_slot":"09:30-d1","last_check":""}"#,
        )
        .unwrap();
        let state = store.load();
        assert_eq!(state.last_fuel_slot, None);
        assert_eq!(state.last_co2_slot, Some(SlotKey::new("09:30", 1)));
        assert_eq!(state.last_check, None);
    }

    #[test]
    fn invalid_timestamp_keeps_slots() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"{"last_fuel_slot":"14:00-d3","last_check":"yesterday"}"#,
        )
        .unwrap();
        let state = store.load();
        assert_eq!(state.last_fuel_slot, Some(SlotKey::new("14:00", 3)));
        assert_eq!(state.last_check, None);
    }

    #[test]
    fn save_omits_unset_fields_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let state = CooldownState {
            last_fuel_slot: Some(SlotKey::new("14:00", 3)),
            ..Default::default()
        };
        store.try_save(&state).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"last_fuel_slot":"14:00-d3"}"#);
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let check = Utc.with_ymd_and_hms(2025, 6, 1, 14, 1, 0).unwrap();
        store.save(&CooldownState {
            last_fuel_slot: Some(SlotKey::new("14:00", 3)),
            last_co2_slot: Some(SlotKey::new("14:00", 3)),
            last_check: Some(check),
        });
        store.save(&CooldownState {
            last_check: Some(check),
            ..Default::default()
        });

        let state = store.load();
        assert_eq!(state.last_fuel_slot, None);
        assert_eq!(state.last_check, Some(check));
    }

    #[test]
    fn save_to_missing_directory_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = CooldownStore::new(dir.path().join("gone").join(COOLDOWN_FILE_NAME));
        assert!(store.try_save(&CooldownState::default()).is_err());
        store.save(&CooldownState::default());
    }

    #[test]
    fn format_slot_none() {
        assert_eq!(format_slot(None), "none");
        assert_eq!(format_slot(Some(&SlotKey::new("14:00", 3))), "14:00-d3");
    }
}
