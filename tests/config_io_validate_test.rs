use bunkerwatch::config::Config;
use bunkerwatch::error::BunkerwatchError;
use std::fs;

const ENV: &str = "\
TELEGRAM_BOT_TOKEN=123456:ABC-DEF
TELEGRAM_CHAT_ID=987654321
SESSION_TOKEN=eyJpdiI6Ik1
FUEL_THRESHOLD=500
CO2_THRESHOLD=10
TIMEZONE=Europe/Amsterdam
LOG_LEVEL=debug
LOG_JSON=true
GAME_VERSION=1.0.400
";

#[test]
fn load_env_file() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), ENV).unwrap();

    let cfg = Config::from_env_file(tmp.path()).unwrap();
    assert_eq!(cfg.telegram.bot_token, "123456:ABC-DEF");
    assert_eq!(cfg.telegram.chat_id, "987654321");
    assert_eq!(cfg.thresholds.fuel, 500);
    assert_eq!(cfg.thresholds.co2, 10);
    assert_eq!(cfg.timezone, "Europe/Amsterdam");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json_format);
    assert_eq!(cfg.game.game_version, "1.0.400");
}

#[test]
fn missing_file_is_config_error() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let err = Config::from_env_file(tmp_dir.path().join(".env")).unwrap_err();
    assert!(matches!(err, BunkerwatchError::Config { .. }));
}

#[test]
fn empty_required_value_fails() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), ENV.replace("SESSION_TOKEN=eyJpdiI6Ik1", "SESSION_TOKEN=")).unwrap();
    let err = Config::from_env_file(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("SESSION_TOKEN"));
}

#[test]
fn invalid_log_level_fails_validation() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), ENV.replace("LOG_LEVEL=debug", "LOG_LEVEL=loud")).unwrap();
    let err = Config::from_env_file(tmp.path()).unwrap_err();
    assert!(matches!(err, BunkerwatchError::Validation { .. }));
}

#[test]
fn inline_comments_are_not_part_of_values() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let env = ENV.replace(
        "TIMEZONE=Europe/Amsterdam",
        "# Optional\nTIMEZONE=CET            # abbreviation or IANA name",
    );
    fs::write(tmp.path(), env).unwrap();

    let cfg = Config::from_env_file(tmp.path()).unwrap();
    assert_eq!(cfg.timezone, "CET");
}
