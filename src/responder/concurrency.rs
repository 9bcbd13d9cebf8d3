//! Request dispatch policy: a fixed worker pool or the framework default

use axum::Router;
use tokio::runtime::Runtime;
use tower::limit::GlobalConcurrencyLimitLayer;

use crate::error::{AppError, Result};

/// How requests are spread over threads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyStrategy {
    /// Exactly `n` runtime workers, at most `n` requests in flight
    Bounded(usize),
    /// Whatever the runtime and HTTP layer choose
    Unbounded,
}

impl ConcurrencyStrategy {
    /// Parse the `mode`/`workers` pair found in configuration
    pub fn from_parts(mode: &str, workers: usize) -> Result<Self> {
        match mode.to_lowercase().as_str() {
            "bounded" | "fixed" => {
                if workers == 0 {
                    return Err(AppError::InvalidConfig(
                        "Bounded concurrency needs at least one worker".to_string(),
                    ));
                }
                Ok(Self::Bounded(workers))
            }
            "unbounded" | "default" => Ok(Self::Unbounded),
            other => Err(AppError::InvalidConfig(format!(
                "Unknown concurrency mode '{}'. Must be 'bounded' or 'unbounded'",
                other
            ))),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Bounded(_) => "bounded",
            Self::Unbounded => "unbounded",
        }
    }

    pub fn worker_threads(&self) -> Option<usize> {
        match self {
            Self::Bounded(n) => Some(*n),
            Self::Unbounded => None,
        }
    }

    /// Build the multi-threaded runtime a responder process runs on
    pub fn build_runtime(&self, thread_name: &str) -> Result<Runtime> {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.enable_all().thread_name(thread_name);

        if let Some(workers) = self.worker_threads() {
            if workers == 0 {
                return Err(AppError::InvalidConfig(
                    "Worker pool size cannot be 0".to_string(),
                ));
            }
            builder.worker_threads(workers);
        }

        Ok(builder.build()?)
    }

    /// Cap in-flight requests on `router` when bounded. One semaphore is
    /// shared by every service the layer wraps, fallback included.
    pub fn apply(&self, router: Router) -> Router {
        match self {
            Self::Bounded(n) => router.layer(GlobalConcurrencyLimitLayer::new(*n)),
            Self::Unbounded => router,
        }
    }
}
