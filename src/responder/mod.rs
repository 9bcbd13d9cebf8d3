//! Responder module - the two static greeting listeners and their dispatch policy

pub mod concurrency;
pub mod greeting;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use concurrency::ConcurrencyStrategy;
pub use greeting::Greeting;

/// Body returned by the gateway for every request
pub const GATEWAY_GREETING: &str = "Gateway says hello!";

/// Body returned by the mock backend for every request
pub const MOCK_BACKEND_GREETING: &str = "Hello from the Mock Backend!";

/// Worker pool size the gateway runs with
pub const GATEWAY_WORKERS: usize = 10;

/// The two independent responders. They never talk to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Responder {
    /// Listens on 8080, fixed pool of ten workers
    Gateway,
    /// Listens on 9001, framework default dispatch
    MockBackend,
}

impl Responder {
    /// Short name used in logs and thread names
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::MockBackend => "mock-backend",
        }
    }

    /// Human-readable title used in the startup line
    pub fn title(&self) -> &'static str {
        match self {
            Self::Gateway => "API Gateway",
            Self::MockBackend => "Mock Backend Server",
        }
    }

    pub fn greeting(&self) -> Greeting {
        match self {
            Self::Gateway => Greeting::new(GATEWAY_GREETING),
            Self::MockBackend => Greeting::new(MOCK_BACKEND_GREETING),
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Gateway => 8080,
            Self::MockBackend => 9001,
        }
    }

    pub fn default_concurrency(&self) -> ConcurrencyStrategy {
        match self {
            Self::Gateway => ConcurrencyStrategy::Bounded(GATEWAY_WORKERS),
            Self::MockBackend => ConcurrencyStrategy::Unbounded,
        }
    }

    /// Prefix for environment overrides, e.g. `GATEWAY__SERVER__PORT`
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::Gateway => "GATEWAY",
            Self::MockBackend => "MOCK_BACKEND",
        }
    }

    /// Optional configuration file looked up at startup
    pub fn config_file(&self) -> &'static str {
        match self {
            Self::Gateway => "config/gateway.toml",
            Self::MockBackend => "config/mock_backend.toml",
        }
    }

    /// Build the router answering every method and path with this responder's greeting
    pub fn router(&self, strategy: ConcurrencyStrategy) -> Router {
        let router = greeting::router(self.greeting());
        strategy
            .apply(router)
            .layer(TraceLayer::new_for_http())
    }
}

impl std::fmt::Display for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
