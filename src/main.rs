use std::sync::Arc;

use campus_records::{microsvc, seed, service, telemetry, AppConfig, AppState, InMemoryModelStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    telemetry::init(&config.log_filter);

    let store = InMemoryModelStore::new();
    if config.seed_demo_data {
        seed::demo_data(&store)?;
    }

    let service = Arc::new(service(AppState::new(store, config.formatting.clone())));
    microsvc::serve(service, &config.bind_address(), shutdown_signal()).await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
