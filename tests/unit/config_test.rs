//! Unit tests for settings loading

use hello_responders::config::Settings;
use hello_responders::{ConcurrencyStrategy, Responder};
use serial_test::serial;
use std::io::Write;

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    let settings =
        Settings::load_from_path(Responder::Gateway, "does/not/exist/gateway.toml").unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(
        settings.concurrency.strategy().unwrap(),
        ConcurrencyStrategy::Bounded(10)
    );
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "text");
}

#[test]
#[serial]
fn test_file_overrides_defaults() {
    let file = toml_file(
        r#"
[server]
host = "127.0.0.1"
port = 18080

[concurrency]
mode = "bounded"
workers = 4

[logging]
format = "json"
"#,
    );

    let settings = Settings::load_from_path(Responder::Gateway, file.path()).unwrap();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 18080);
    assert_eq!(
        settings.concurrency.strategy().unwrap(),
        ConcurrencyStrategy::Bounded(4)
    );
    assert_eq!(settings.logging.format, "json");
    assert_eq!(settings.logging.level, "info");
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_partial_file_keeps_responder_defaults() {
    let file = toml_file(
        r#"
[logging]
level = "debug"
"#,
    );

    let settings = Settings::load_from_path(Responder::MockBackend, file.path()).unwrap();

    assert_eq!(settings.server.port, 9001);
    assert_eq!(
        settings.concurrency.strategy().unwrap(),
        ConcurrencyStrategy::Unbounded
    );
    assert_eq!(settings.logging.level, "debug");
}

#[test]
#[serial]
fn test_invalid_concurrency_fails_validation() {
    let file = toml_file(
        r#"
[concurrency]
mode = "bounded"
workers = 0
"#,
    );

    let settings = Settings::load_from_path(Responder::Gateway, file.path()).unwrap();
    assert!(settings.validate().is_err());
}

#[test]
#[serial]
fn test_environment_overrides_file_and_defaults() {
    let file = toml_file(
        r#"
[server]
port = 18080
"#,
    );

    std::env::set_var("GATEWAY__SERVER__PORT", "18081");
    std::env::set_var("GATEWAY__CONCURRENCY__WORKERS", "3");

    let result = Settings::load_from_path(Responder::Gateway, file.path());

    std::env::remove_var("GATEWAY__SERVER__PORT");
    std::env::remove_var("GATEWAY__CONCURRENCY__WORKERS");

    let settings = result.unwrap();
    assert_eq!(settings.server.port, 18081);
    assert_eq!(
        settings.concurrency.strategy().unwrap(),
        ConcurrencyStrategy::Bounded(3)
    );
    assert_eq!(settings.server.host, "0.0.0.0");
}

#[test]
#[serial]
fn test_environment_prefix_is_per_responder() {
    std::env::set_var("GATEWAY__SERVER__PORT", "18082");

    let result = Settings::load_from_path(Responder::MockBackend, "does/not/exist.toml");

    std::env::remove_var("GATEWAY__SERVER__PORT");

    assert_eq!(result.unwrap().server.port, 9001);
}
