use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use keyed_orders::{config::ServerConfig, telemetry, web, OrderRegistry, ServiceCollection};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    let mut services = ServiceCollection::new();
    OrderRegistry::register(&mut services);
    let provider = Arc::new(services.build());

    let app = web::app(provider);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "orders API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("orders API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
