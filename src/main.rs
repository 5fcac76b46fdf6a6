use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};

use genixhub::logging::init_logging;
use genixhub::router::init_router;
use genixhub::state::init_app_state;
use genixhub_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_logging(&server_config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?server_config.environment,
        storage = ?server_config.storage,
        "Starting Genix Hub API"
    );

    let state = init_app_state(server_config.clone()).await?;
    let app = init_router(state);

    let addr = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
