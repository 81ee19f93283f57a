use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::info;

use notes_api::bootstrap::app_context;
use notes_api::bootstrap::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "notes_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting notes backend");

    let ctx = app_context::build(cfg.clone()).await?;
    let app = notes_api::presentation::http::router(ctx);

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    info!(%api_addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
