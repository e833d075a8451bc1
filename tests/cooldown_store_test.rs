use bunkerwatch::cooldown::{CooldownState, CooldownStore};
use bunkerwatch::prices::SlotKey;
use chrono::{TimeZone, Utc};

#[test]
fn save_and_reload_roundtrip() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join(".cooldown");

    let state = CooldownState {
        last_fuel_slot: Some(SlotKey::new("14:00", 3)),
        last_co2_slot: Some(SlotKey::new("09:30", 1)),
        last_check: Some(Utc.with_ymd_and_hms(2025, 6, 1, 14, 1, 7).unwrap()),
    };
    CooldownStore::new(&path).try_save(&state).unwrap();

    let loaded = CooldownStore::new(&path).load();
    assert_eq!(loaded, state);
}

#[test]
fn empty_state_roundtrip() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join(".cooldown");

    CooldownStore::new(&path).save(&CooldownState::default());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    assert_eq!(CooldownStore::new(&path).load(), CooldownState::default());
}

#[test]
fn reads_file_written_with_offset_timestamp() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        tmp.path(),
        r#"{"last_fuel_slot":"14:00-d3","last_co2_slot":"","last_check":"2025-06-01T16:01:00+02:00"}"#,
    )
    .unwrap();

    let state = CooldownStore::new(tmp.path()).load();
    assert_eq!(state.last_fuel_slot, Some(SlotKey::new("14:00", 3)));
    assert_eq!(state.last_co2_slot, None);
    assert_eq!(
        state.last_check,
        Some(Utc.with_ymd_and_hms(2025, 6, 1, 14, 1, 0).unwrap())
    );
}

#[test]
fn unreadable_path_is_empty_state() {
    let tmp_dir = tempfile::tempdir().unwrap();
    // A directory where the file should be
    let state = CooldownStore::new(tmp_dir.path()).load();
    assert_eq!(state, CooldownState::default());
}
