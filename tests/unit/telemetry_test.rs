//! Unit tests for tracing setup. Kept in its own binary: it installs the
//! process-wide subscriber.

use hello_responders::config::LoggingConfig;
use hello_responders::telemetry::init_tracing;
use hello_responders::AppError;

#[test]
fn test_init_tracing_installs_once() {
    let json = LoggingConfig {
        level: "debug".to_string(),
        format: "json".to_string(),
    };
    assert!(init_tracing(&json).is_ok());

    tracing::info!("subscriber installed");

    let err = init_tracing(&LoggingConfig::default()).unwrap_err();
    assert!(matches!(err, AppError::Internal(_)), "unexpected error: {}", err);
    assert!(err.to_string().contains("Failed to initialise tracing"));
}
