//! Display timezone resolution
//!
//! Scheduling is UTC only. The configured timezone is used purely to render
//! times in log lines, so an unknown value degrades to the system zone with
//! a warning instead of failing startup.

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

use crate::logging::get_logger;

/// Common abbreviations mapped to IANA names. Ambiguous abbreviations
/// resolve to the most populous region; the full IANA name selects the
/// other meaning (e.g. `America/Chicago` vs `Asia/Shanghai`).
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("UTC", "UTC"),
    ("GMT", "Europe/London"),

    ("WET", "Europe/Lisbon"),
    ("WEST", "Europe/Lisbon"),
    ("CET", "Europe/Berlin"),
    ("CEST", "Europe/Berlin"),
    ("MET", "Europe/Berlin"),
    ("MEST", "Europe/Berlin"),
    ("EET", "Europe/Bucharest"),
    ("EEST", "Europe/Bucharest"),
    ("BST", "Europe/London"),
    ("IST", "Asia/Kolkata"),
    ("MSK", "Europe/Moscow"),
    ("SAMT", "Europe/Samara"),
    ("YEKT", "Asia/Yekaterinburg"),
    ("GET", "Asia/Tbilisi"),
    ("AZT", "Asia/Baku"),
    ("AMT", "Asia/Yerevan"),
    ("FET", "Europe/Minsk"),
    ("TRT", "Europe/Istanbul"),

    ("NST", "America/St_Johns"),
    ("NDT", "America/St_Johns"),
    ("AST", "America/Halifax"),
    ("ADT", "America/Halifax"),
    ("EST", "America/New_York"),
    ("EDT", "America/New_York"),
    ("CST", "America/Chicago"),
    ("CDT", "America/Chicago"),
    ("MST", "America/Denver"),
    ("MDT", "America/Denver"),
    ("PST", "America/Los_Angeles"),
    ("PDT", "America/Los_Angeles"),
    ("AKST", "America/Anchorage"),
    ("AKDT", "America/Anchorage"),
    ("HST", "Pacific/Honolulu"),
    ("HAST", "Pacific/Honolulu"),
    ("HADT", "America/Adak"),

    ("CST6", "America/Costa_Rica"),
    ("ECT", "America/Guayaquil"),
    ("COT", "America/Bogota"),
    ("VET", "America/Caracas"),
    ("PET", "America/Lima"),
    ("CIDST", "America/Cayman"),
    ("CUT", "America/Havana"),

    ("BRT", "America/Sao_Paulo"),
    ("BRST", "America/Sao_Paulo"),
    ("ART", "America/Argentina/Buenos_Aires"),
    ("CLT", "America/Santiago"),
    ("CLST", "America/Santiago"),
    ("UYT", "America/Montevideo"),
    ("PYT", "America/Asuncion"),
    ("PYST", "America/Asuncion"),
    ("BOT", "America/La_Paz"),
    ("GFT", "America/Cayenne"),
    ("SRT", "America/Paramaribo"),
    ("GYT", "America/Guyana"),
    ("FKT", "Atlantic/Stanley"),

    ("JST", "Asia/Tokyo"),
    ("KST", "Asia/Seoul"),
    ("CST8", "Asia/Shanghai"),
    ("HKT", "Asia/Hong_Kong"),
    ("TWT", "Asia/Taipei"),
    ("PHT", "Asia/Manila"),
    ("PHST", "Asia/Manila"),
    ("MYT", "Asia/Kuala_Lumpur"),
    ("SGT", "Asia/Singapore"),
    ("BNT", "Asia/Brunei"),

    ("ICT", "Asia/Bangkok"),
    ("WIB", "Asia/Jakarta"),
    ("WITA", "Asia/Makassar"),
    ("WIT", "Asia/Jayapura"),
    ("MMT", "Asia/Yangon"),

    ("PKT", "Asia/Karachi"),
    ("NPT", "Asia/Kathmandu"),
    ("BST5", "Asia/Dhaka"),
    ("MVT", "Indian/Maldives"),
    ("LKT", "Asia/Colombo"),

    ("ALMT", "Asia/Almaty"),
    ("QYZT", "Asia/Qyzylorda"),
    ("ORAT", "Asia/Oral"),
    ("UZT", "Asia/Tashkent"),
    ("TMT", "Asia/Ashgabat"),
    ("TJT", "Asia/Dushanbe"),
    ("KGT", "Asia/Bishkek"),

    ("AFT", "Asia/Kabul"),
    ("IRST", "Asia/Tehran"),
    ("IRDT", "Asia/Tehran"),
    ("GST", "Asia/Dubai"),

    ("AST3", "Asia/Riyadh"),
    ("IDT", "Asia/Jerusalem"),

    ("AEST", "Australia/Sydney"),
    ("AEDT", "Australia/Sydney"),
    ("ACST", "Australia/Adelaide"),
    ("ACDT", "Australia/Adelaide"),
    ("AWST", "Australia/Perth"),
    ("LHST", "Australia/Lord_Howe"),
    ("LHDT", "Australia/Lord_Howe"),
    ("NFDT", "Pacific/Norfolk"),
    ("CXT", "Indian/Christmas"),
    ("CCT", "Indian/Cocos"),

    ("NZST", "Pacific/Auckland"),
    ("NZDT", "Pacific/Auckland"),
    ("CHAST", "Pacific/Chatham"),
    ("CHADT", "Pacific/Chatham"),
    ("FJT", "Pacific/Fiji"),
    ("FJST", "Pacific/Fiji"),
    ("TVT", "Pacific/Funafuti"),
    ("WST", "Pacific/Apia"),
    ("TOT", "Pacific/Tongatapu"),
    ("GILT", "Pacific/Tarawa"),
    ("MHT", "Pacific/Majuro"),
    ("PONT", "Pacific/Pohnpei"),
    ("KOST", "Pacific/Kosrae"),
    ("CHUT", "Pacific/Chuuk"),
    ("VUT", "Pacific/Efate"),
    ("SBT", "Pacific/Guadalcanal"),
    ("NCT", "Pacific/Noumea"),
    ("PGT", "Pacific/Port_Moresby"),
    ("NRT", "Pacific/Nauru"),
    ("SST", "Pacific/Pago_Pago"),
    ("TAHT", "Pacific/Tahiti"),
    ("CKT", "Pacific/Rarotonga"),
    ("NUT", "Pacific/Niue"),
    ("TKT", "Pacific/Fakaofo"),
    ("GALT", "Pacific/Galapagos"),
    ("MART", "Pacific/Marquesas"),
    ("GAMT", "Pacific/Gambier"),
    ("WAKT", "Pacific/Wake"),

    ("CAT", "Africa/Johannesburg"),
    ("SAST", "Africa/Johannesburg"),
    ("EAT", "Africa/Nairobi"),
    ("WAT", "Africa/Lagos"),
    ("WAST", "Africa/Windhoek"),
    ("MUT", "Indian/Mauritius"),
    ("RET", "Indian/Reunion"),
    ("SCT", "Indian/Mahe"),
    ("CVT", "Atlantic/Cape_Verde"),

    ("AZOT", "Atlantic/Azores"),
    ("AZOST", "Atlantic/Azores"),
    ("FNT", "America/Noronha"),
    ("PMST", "America/Miquelon"),
    ("PMDT", "America/Miquelon"),
    ("WGT", "America/Nuuk"),
    ("WGST", "America/Nuuk"),
    ("EGT", "America/Scoresbysund"),
    ("EGST", "America/Scoresbysund"),
];

static ABBREVIATION_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ABBREVIATIONS.iter().copied().collect());

/// Timezone used for human-readable times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTimezone {
    /// The host's local zone
    Local,
    /// A named IANA zone
    Zone(Tz),
}

impl DisplayTimezone {
    /// Render `instant` in this zone with a chrono format string
    pub fn format(&self, instant: DateTime<Utc>, fmt: &str) -> String {
        match self {
            DisplayTimezone::Local => instant.with_timezone(&Local).format(fmt).to_string(),
            DisplayTimezone::Zone(tz) => instant.with_timezone(tz).format(fmt).to_string(),
        }
    }

    /// `"never"` when unset, otherwise `YYYY-MM-DD HH:MM:SS` in this zone
    pub fn format_last_check(&self, instant: Option<DateTime<Utc>>) -> String {
        match instant {
            Some(t) => self.format(t, "%Y-%m-%d %H:%M:%S"),
            None => "never".to_string(),
        }
    }
}

impl fmt::Display for DisplayTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayTimezone::Local => f.write_str("Local"),
            DisplayTimezone::Zone(tz) => f.write_str(tz.name()),
        }
    }
}

/// Look up an abbreviation (case-insensitive)
pub fn abbreviation_to_iana(abbreviation: &str) -> Option<&'static str> {
    ABBREVIATION_INDEX
        .get(abbreviation.to_ascii_uppercase().as_str())
        .copied()
}

/// Resolve an abbreviation or IANA name; empty input means the local zone
pub fn resolve_timezone(input: &str) -> DisplayTimezone {
    let input = input.trim();
    if input.is_empty() {
        return DisplayTimezone::Local;
    }

    if let Some(tz) = abbreviation_to_iana(input).and_then(|iana| iana.parse::<Tz>().ok()) {
        return DisplayTimezone::Zone(tz);
    }

    if let Ok(tz) = input.parse::<Tz>() {
        return DisplayTimezone::Zone(tz);
    }

    get_logger("timezone").warn(&format!(
        "Unknown timezone '{}', falling back to local system timezone",
        input
    ));
    DisplayTimezone::Local
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_is_local() {
        assert_eq!(resolve_timezone(""), DisplayTimezone::Local);
        assert_eq!(resolve_timezone("   "), DisplayTimezone::Local);
    }

    #[test]
    fn abbreviations_are_case_insensitive() {
        assert_eq!(
            resolve_timezone("cet"),
            DisplayTimezone::Zone(chrono_tz::Europe::Berlin)
        );
        assert_eq!(
            resolve_timezone("IST"),
            DisplayTimezone::Zone(chrono_tz::Asia::Kolkata)
        );
        assert_eq!(
            resolve_timezone("CST"),
            DisplayTimezone::Zone(chrono_tz::America::Chicago)
        );
    }

    #[test]
    fn iana_names_pass_through() {
        assert_eq!(
            resolve_timezone("Asia/Dubai"),
            DisplayTimezone::Zone(chrono_tz::Asia::Dubai)
        );
    }

    #[test]
    fn unknown_falls_back_to_local() {
        assert_eq!(resolve_timezone("Mars/Olympus"), DisplayTimezone::Local);
    }

    #[test]
    fn every_abbreviation_maps_to_a_known_zone() {
        for (abbr, iana) in ABBREVIATIONS {
            assert!(iana.parse::<Tz>().is_ok(), "{abbr} -> {iana}");
        }
    }

    #[test]
    fn formats_in_zone() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 15, 14, 1, 0).unwrap();
        let tz = resolve_timezone("Europe/Berlin");
        assert_eq!(tz.format(instant, "%H:%M"), "15:01");
        assert_eq!(tz.to_string(), "Europe/Berlin");
        assert_eq!(tz.format_last_check(None), "never");
        assert_eq!(
            tz.format_last_check(Some(instant)),
            "2025-01-15 15:01:00"
        );
    }
}
