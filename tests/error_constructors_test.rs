use bunkerwatch::error::BunkerwatchError;

#[test]
fn error_constructors() {
    assert!(matches!(
        BunkerwatchError::config("x"),
        BunkerwatchError::Config { .. }
    ));
    assert!(matches!(
        BunkerwatchError::validation("f", "m"),
        BunkerwatchError::Validation { .. }
    ));
    assert!(matches!(BunkerwatchError::io("x"), BunkerwatchError::Io { .. }));
    assert!(matches!(
        BunkerwatchError::serialization("x"),
        BunkerwatchError::Serialization { .. }
    ));
    assert!(matches!(
        BunkerwatchError::network("x"),
        BunkerwatchError::Network { .. }
    ));
    assert!(matches!(
        BunkerwatchError::timeout("x"),
        BunkerwatchError::Timeout { .. }
    ));
    assert!(matches!(BunkerwatchError::api("x"), BunkerwatchError::Api { .. }));
    assert!(matches!(
        BunkerwatchError::notification("x"),
        BunkerwatchError::Notification { .. }
    ));
}

#[test]
fn io_errors_convert() {
    let err: BunkerwatchError =
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
    assert!(err.to_string().starts_with("I/O error"));
}
