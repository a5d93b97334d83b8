use std::sync::Arc;

use eco_route::config::{REQUIRED_VARIABLES, ServiceConfig};
use eco_route::google::GoogleMapsClient;
use eco_route::planner::PlanOptions;
use eco_route::service::{AppState, router};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env().inspect_err(|e| {
        tracing::error!(
            "config: {e}. Check all required environment variables ({}) are set.",
            REQUIRED_VARIABLES.join(", ")
        );
    })?;

    config.log();

    // The blocking client owns its own runtime, so it is created and dropped
    // outside tokio.
    let client = Arc::new(GoogleMapsClient::new(config.maps.clone())?);
    let state = AppState::new(client.clone(), PlanOptions::default());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let listen_addr = format!("0.0.0.0:{}", config.listen_port);
        let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

        tracing::info!("Listening on {listen_addr}");
        axum::serve(listener, router(state)).await?;

        anyhow::Ok(())
    })?;

    drop(runtime);
    drop(client);
    Ok(())
}
