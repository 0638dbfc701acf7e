// --- File: crates/devicehub_gateway/src/routes.rs ---

use crate::device_client::DeviceServiceClient;
use crate::error::ClientError;
use crate::handlers::{receive_message_handler, GatewayState};
use crate::reading_client::ReadingServiceClient;
use axum::{routing::post, Router};
use devicehub_common::catch_panic_layer;
use devicehub_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Creates the gateway router with HTTP clients built from the configuration.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, ClientError> {
    match config.device_service_url() {
        Some(url) => info!("Forwarding registrations to {}", url),
        None => warn!("No device service URL configured; every message will be rejected"),
    }
    if config.reading_service_url().is_none() {
        info!("No reading service URL configured; readings will not be stored");
    }

    let gateway_state = GatewayState {
        devices: Arc::new(DeviceServiceClient::from_config(&config)?),
        readings: Arc::new(ReadingServiceClient::from_config(&config)?),
    };

    Ok(routes_with_state(gateway_state))
}

/// Creates the gateway router over the given dependencies.
pub fn routes_with_state(gateway_state: GatewayState) -> Router {
    Router::new()
        .route("/messages", post(receive_message_handler))
        .layer(catch_panic_layer())
        .with_state(Arc::new(gateway_state))
}
