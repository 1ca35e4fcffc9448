mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use roster_db::Database;
use roster_engine::{ReviewService, SeededRandom};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = if config.in_memory() {
        info!("Using in-memory database");
        Database::open_in_memory()?
    } else {
        Database::open(&config.db_path)?
    };

    let rng = match config.rng_seed {
        Some(seed) => {
            info!(seed, "Reviewer draws are seeded");
            SeededRandom::with_seed(seed)
        }
        None => SeededRandom::from_entropy(),
    };

    let engine = ReviewService::new(Arc::new(db), Arc::new(rng));

    let app = roster_api::routes::router(engine)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Roster server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
