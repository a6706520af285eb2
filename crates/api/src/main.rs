use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use village_api::config::ServerConfig;
use village_api::lifecycle::{Lifecycle, Outcome};
use village_api::router::build_app_router;
use village_api::state::AppState;

const DEV_LOG_FILTER: &str = "village_api=debug,village_db=debug,tower_http=debug";
const LOG_FILTER: &str = "village_api=info,village_db=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    let default_filter = if config.is_dev() {
        DEV_LOG_FILTER
    } else {
        LOG_FILTER
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = %config.environment,
        "Loaded server configuration",
    );

    let lifecycle = Lifecycle::new();

    // --- Database ---
    let pool = village_db::create_pool(&config.db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", config.db_path.display()))?;
    tracing::info!(db_path = %config.db_path.display(), "Database connection pool created");

    village_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    village_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Router ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Listener ---
    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, "Listening");

    // --- Serve until signalled ---
    let outcome = lifecycle
        .run(
            |drain| async move {
                axum::serve(listener, app)
                    .with_graceful_shutdown(drain.cancelled_owned())
                    .await
            },
            shutdown_signal(),
            config.shutdown_grace(),
        )
        .await?;

    match outcome {
        Outcome::Graceful => tracing::info!("Graceful shutdown complete"),
        Outcome::ForcedAfterGrace => tracing::warn!(
            grace_secs = config.shutdown_grace_secs,
            "Shutdown forced after grace period",
        ),
        Outcome::ServerExited => tracing::warn!("Server exited without a shutdown signal"),
    }

    pool.close().await;
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed, that branch never resolves and the other still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
