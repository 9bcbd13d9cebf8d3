//! Responder settings and configuration management

use crate::error::{AppError, Result};
use crate::responder::{ConcurrencyStrategy, Responder};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub concurrency: ConcurrencyConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl ServerConfig {
    /// Resolve the address the listener binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                AppError::InvalidConfig(format!(
                    "Host '{}' did not resolve to any address",
                    self.host
                ))
            })
    }
}

/// Request dispatch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConcurrencyConfig {
    /// "bounded" or "unbounded"
    pub mode: String,
    #[serde(default)]
    pub workers: usize,
}

impl ConcurrencyConfig {
    pub fn strategy(&self) -> Result<ConcurrencyStrategy> {
        ConcurrencyStrategy::from_parts(&self.mode, self.workers)
    }
}

impl From<ConcurrencyStrategy> for ConcurrencyConfig {
    fn from(strategy: ConcurrencyStrategy) -> Self {
        Self {
            mode: strategy.mode().to_string(),
            workers: strategy.worker_threads().unwrap_or(0),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Built-in settings for a responder: its fixed port and dispatch policy
    pub fn for_responder(responder: Responder) -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: responder.default_port(),
            },
            concurrency: responder.default_concurrency().into(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load settings from the responder's configuration file and environment variables
    pub fn load(responder: Responder) -> Result<Self> {
        Self::load_from_path(responder, responder.config_file())
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(responder: Responder, path: P) -> Result<Self> {
        let defaults = Self::for_responder(responder);

        let config = Config::builder()
            // Start with the responder's fixed values
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default("concurrency.mode", defaults.concurrency.mode)?
            .set_default("concurrency.workers", defaults.concurrency.workers as i64)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            // Load from configuration file
            .add_source(
                File::with_name(path.as_ref().to_str().unwrap_or(responder.config_file()))
                    .required(false),
            )
            // Override with environment variables (e.g. GATEWAY__SERVER__PORT)
            .add_source(
                Environment::with_prefix(responder.env_prefix())
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::InvalidConfig(
                "Server port cannot be 0".to_string(),
            ));
        }

        self.concurrency.strategy()?;

        if !["text", "json"].contains(&self.logging.format.as_str()) {
            return Err(AppError::InvalidConfig(format!(
                "Invalid log format '{}'. Must be 'text' or 'json'",
                self.logging.format
            )));
        }

        Ok(())
    }
}
