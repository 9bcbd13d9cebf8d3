//! Server lifecycle - bind, start, stop

use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::responder::Responder;

/// A responder whose socket is bound but which is not serving yet
pub struct ResponderServer {
    responder: Responder,
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl ResponderServer {
    /// Bind the listening socket. A taken port fails here, with no retry
    /// and no fallback port.
    pub async fn bind(responder: Responder, settings: &Settings) -> Result<Self> {
        let strategy = settings.concurrency.strategy()?;
        let addr = settings.server.socket_addr()?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| AppError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        debug!(
            responder = %responder,
            addr = %local_addr,
            concurrency = strategy.mode(),
            "Socket bound"
        );

        Ok(Self {
            responder,
            listener,
            router: responder.router(strategy),
            local_addr,
        })
    }

    pub fn responder(&self) -> Responder {
        self.responder
    }

    /// Address actually bound, useful when the configured port was 0
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `signal` resolves, then drain open connections
    pub async fn serve_until<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let responder = self.responder;

        info!(
            responder = %responder,
            addr = %self.local_addr,
            "{} started successfully on port {}",
            responder.title(),
            self.local_addr.port()
        );

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        info!(responder = %responder, "Server stopped");
        Ok(())
    }

    /// Serve in a background task on the current runtime
    pub fn start(self) -> RunningServer {
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let local_addr = self.local_addr;
        let responder = self.responder;

        let task = tokio::spawn(self.serve_until(async move {
            let _ = shutdown_rx.await;
        }));

        RunningServer {
            responder,
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }
}

/// Handle to a serving responder. Dropping it also triggers shutdown.
pub struct RunningServer {
    responder: Responder,
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<()>>,
}

impl RunningServer {
    pub fn responder(&self) -> Responder {
        self.responder
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop accepting, wait for in-flight requests and release the socket
    pub async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        (&mut self.task)
            .await
            .map_err(|e| AppError::Internal(format!("Server task failed: {}", e)))?
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
