use anyhow::Context;
use tokio::net::TcpListener;

use shopdesk_api::{app, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopdesk_observability::init();

    let config = AppConfig::from_env()?;
    let services = app::services::build_services(&config);
    let router = app::build_app(services, config.jwt_secret.clone());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
