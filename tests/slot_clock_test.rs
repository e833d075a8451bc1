use bunkerwatch::slot::{current_slot_time, next_boundary};
use chrono::{Duration, TimeZone, Timelike, Utc};

#[test]
fn every_minute_of_a_day_maps_to_its_half_hour() {
    let midnight = Utc.with_ymd_and_hms(2025, 10, 26, 0, 0, 0).unwrap();
    for minute in 0..(24 * 60) {
        let now = midnight + Duration::minutes(minute) + Duration::seconds(59);
        let expected = format!(
            "{:02}:{}",
            now.hour(),
            if now.minute() < 30 { "00" } else { "30" }
        );
        assert_eq!(current_slot_time(now), expected);
    }
}

#[test]
fn boundary_check_falls_inside_the_slot_it_follows() {
    let start = Utc.with_ymd_and_hms(2025, 10, 26, 23, 0, 0).unwrap();
    for minute in 0..120 {
        let now = start + Duration::minutes(minute);
        let next = next_boundary(now);
        // A check one minute after the boundary sees the freshly started slot
        let slot = current_slot_time(next);
        assert!(slot.ends_with(":00") || slot.ends_with(":30"));
        assert_eq!(&slot[..2], format!("{:02}", next.hour()));
    }
}
