//! Configuration module - layered defaults, config file and environment

pub mod settings;

pub use settings::{ConcurrencyConfig, LoggingConfig, ServerConfig, Settings};
