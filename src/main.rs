use std::net::TcpListener;

use actix_web::web;
use anyhow::Context;
use profile_hub::{
    background_task::start_limiter_eviction_task,
    server::{build_server, shutdown_signal},
    settings::AppConfig,
    telemetry,
    AppState,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config));
    app_state
        .seed(&config)
        .await
        .context("Failed to create seed user")?;

    let server_addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&server_addr)
        .with_context(|| format!("Failed to bind {}", server_addr))?;

    tracing::info!(
        "Starting {} v{} on {} ({})",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.env
    );

    tokio::spawn(start_limiter_eviction_task(app_state.login_limiter.clone()));

    let server = build_server(listener, app_state, &config)?;

    tokio::select! {
        res = server => res.context("Server error")?,
        _ = shutdown_signal() => {}
    }

    Ok(())
}
