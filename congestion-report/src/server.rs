use crate::handlers;
use axum::{Router, routing::get};
use congestion_fetch::DatasetSource;
use congestion_observability::FindingLog;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared state for the report server.
pub struct ReportState {
    pub source: Arc<dyn DatasetSource>,
    pub log: Arc<FindingLog>,
}

impl ReportState {
    pub fn new(source: Arc<dyn DatasetSource>, log: Arc<FindingLog>) -> Self {
        Self { source, log }
    }

    /// File name shown on the page, without the directory.
    pub fn log_name(&self) -> String {
        let path = self.log.path();
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// Build the axum router. Every page view runs one report cycle.
pub fn build_router(state: Arc<ReportState>) -> Router {
    Router::new()
        .route("/", get(handlers::page::report_page))
        .route("/api/slowest", get(handlers::api::slowest))
        .route("/health", get(handlers::health::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until SIGINT or SIGTERM.
pub async fn serve(addr: &str, state: Arc<ReportState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Report server listening");
    serve_until(listener, state, shutdown_signal()).await
}

/// Serve on `listener` until `shutdown` resolves, then drain in-flight requests.
pub async fn serve_until<F>(listener: TcpListener, state: Arc<ReportState>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Report server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
    info!("Shutdown signal received, stopping...");
}
