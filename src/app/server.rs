use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::config::AppConfig;
use super::context::AppContext;
use super::error::AppError;
use crate::engine::{PipelineStats, StatsSnapshot};
use crate::gateway::{HttpProcessorGateway, ProcessorEndpoints, ProcessorGateway};
use crate::http::router;
use crate::queue::AdmissionQueue;
use crate::storage::ConcurrentOutcomeStore;

/// Service runner that handles:
/// - Wiring queue, store, workers and router from an `AppConfig`
/// - Signal handling (SIGINT, SIGTERM)
/// - Graceful shutdown: stop accepting, then give workers `shutdown_grace`
pub struct ServerApp {
    config: AppConfig,
}

impl ServerApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Bind `config.bind_addr` and serve until SIGINT/SIGTERM
    pub async fn run(self) -> Result<StatsSnapshot, AppError> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener, wait_for_signal()).await
    }

    /// Serve on `listener` with the reqwest gateway until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<StatsSnapshot, AppError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let client = reqwest::Client::builder().build()?;
        let gateway = HttpProcessorGateway::new(
            client,
            ProcessorEndpoints::from_base_urls(&self.config.default_url, &self.config.fallback_url),
        );
        self.serve_with_gateway(listener, gateway, shutdown).await
    }

    /// Serve with any gateway until `shutdown` resolves, then drain workers
    ///
    /// Returns the final pipeline counters.
    pub async fn serve_with_gateway<G, F>(
        self,
        listener: TcpListener,
        gateway: G,
        shutdown: F,
    ) -> Result<StatsSnapshot, AppError>
    where
        G: ProcessorGateway + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        let ctx = AppContext::new(
            AdmissionQueue::bounded(self.config.queue_capacity),
            Arc::new(ConcurrentOutcomeStore::new()),
            Arc::new(PipelineStats::new()),
        );

        let workers = CancellationToken::new();
        let pool = ctx.spawn_workers(gateway, &self.config, workers.clone());

        info!(
            addr = %listener.local_addr()?,
            workers = pool.size(),
            queue_capacity = ctx.queue().capacity(),
            "Listening"
        );

        let served = axum::serve(listener, router(ctx.clone()))
            .with_graceful_shutdown(shutdown)
            .await;

        let report = pool.shutdown(self.config.shutdown_grace).await;
        let snapshot = ctx.stats().snapshot();
        info!(
            processed = report.total_processed(),
            clean = report.all_finished(),
            pending = ctx.queue().len(),
            stats = ?snapshot,
            "Shutdown complete"
        );

        served?;
        Ok(snapshot)
    }
}

/// Wait for SIGINT or SIGTERM (Ctrl+C off unix)
pub async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "Failed to install signal handlers, using Ctrl+C");
                ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl+C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
