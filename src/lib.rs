//! Static greeting responders
//!
//! Two independent HTTP listeners, a gateway and a mock backend, that answer
//! every request with the same fixed body. Neither forwards to the other.

pub mod app;
pub mod config;
pub mod error;
pub mod responder;
pub mod server;
pub mod telemetry;

pub use error::{AppError, Result};
pub use responder::{ConcurrencyStrategy, Greeting, Responder};
pub use server::{ResponderServer, RunningServer};
