//! Error context extension tests

use sando_domain::Error;
use sando_infrastructure::error_ext::ErrorContext;

fn io_failure() -> std::result::Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
}

#[test]
fn test_context_wraps_as_infrastructure_error() {
    let err = io_failure().context("Loading cache").unwrap_err();
    assert!(matches!(err, Error::Infrastructure { .. }));
    assert!(err.to_string().contains("Loading cache: missing"));
}

#[test]
fn test_io_and_config_context() {
    assert!(matches!(
        io_failure().io_context("Reading file").unwrap_err(),
        Error::Io { source: Some(_), .. }
    ));
    assert!(matches!(
        io_failure().config_context("Parsing config").unwrap_err(),
        Error::Configuration { source: Some(_), .. }
    ));
}
