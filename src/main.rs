mod app;
mod config;
mod middlewares;
mod routes;
mod services;
mod types;
mod utils;
mod widget;

use std::process::ExitCode;

use tracing::{error, info};

use crate::{
    config::WidgetConfig,
    services::places_client::places_service::PlacesServiceConfig,
    widget::geolocation::StaticGeolocator,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    info!("Starting explorer search...");

    let config = match WidgetConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = app::gen_state(
        PlacesServiceConfig {
            api_key: config.places_api_key.clone(),
            host: config.places_host.clone(),
        },
        config.debounce,
        config.auth_key.clone(),
    );

    state
        .widget
        .bootstrap_location(&StaticGeolocator::new(config.device_location))
        .await;

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("Listening on {}", config.bind_addr);

    let widget = state.widget.clone();
    let result = axum::serve(listener, app::gen_app(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;
    widget.shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
