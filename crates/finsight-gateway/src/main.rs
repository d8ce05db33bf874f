//! finsight gateway
//!
//! - Config: `$FINSIGHT_CONFIG` (default `finsight.yaml`), `$FINSIGHT_MONGO_URI` override
//! - Endpoints: /returns-volatility, /dummy-portfolio, /heatmap, /profit-projection,
//!   /most-traded, /healthz, /readyz, /metrics
//! - Graceful shutdown on Ctrl+C / SIGTERM (readiness reports draining first)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use finsight_core::error::FinsightError;
use finsight_gateway::store::{MongoRecordSource, RecordSource};
use finsight_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = config::load_from_env()?;
    let listen: SocketAddr = cfg.server.listen.parse().map_err(|e| {
        FinsightError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
    })?;

    let source = MongoRecordSource::connect(&cfg.database, cfg.loader.on_malformed).await?;
    if let Err(e) = source.ping().await {
        // not fatal: every request rescans, so the store may come up later
        tracing::warn!(error = %e, "record store not reachable at startup");
    }

    let state = AppState::new(cfg, Arc::new(source))?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "finsight-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    tracing::info!("finsight-gateway stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    state.set_draining();
    tracing::info!("signal received, starting graceful shutdown");
}
