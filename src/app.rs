//! Process entry shared by the responder binaries

use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::responder::Responder;
use crate::server::{shutdown_signal, ResponderServer};
use crate::telemetry;

/// Load settings, build the runtime for the responder's dispatch policy and
/// serve until a shutdown signal arrives.
pub fn run(responder: Responder) -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let settings = Settings::load(responder)?;
    settings.validate()?;
    telemetry::init_tracing(&settings.logging)?;

    let strategy = settings.concurrency.strategy()?;
    info!(
        responder = %responder,
        host = %settings.server.host,
        port = settings.server.port,
        workers = ?strategy.worker_threads(),
        "Starting {}",
        responder.title()
    );

    let runtime = strategy.build_runtime(responder.name())?;
    runtime.block_on(async move {
        let server = ResponderServer::bind(responder, &settings).await?;
        server.serve_until(shutdown_signal()).await
    })
}
