// --- File: crates/devicehub_registry/src/routes.rs ---

use crate::handlers::{
    get_device_username_handler, health_handler, upsert_device_handler, RegistryState,
};
use axum::{
    routing::{get, put},
    Router,
};
use devicehub_common::catch_panic_layer;
use devicehub_config::AppConfig;
use devicehub_db::{DbClient, DbError, DeviceRepository, SqlDeviceRepository};
use std::sync::Arc;
use tracing::info;

/// Connects to the configured database, creates the schema and returns the registry router.
pub async fn routes(config: Arc<AppConfig>) -> Result<Router, DbError> {
    let db_client = DbClient::new(&config).await?;
    let repository = SqlDeviceRepository::new(db_client);
    repository.init_schema().await?;
    info!("Device registry ready");

    Ok(routes_with_repository(repository))
}

/// Builds the registry router over an existing repository.
pub fn routes_with_repository(repository: SqlDeviceRepository) -> Router {
    let registry_state = Arc::new(RegistryState { repository });

    Router::new()
        .route("/devices/{device_id}", put(upsert_device_handler))
        .route(
            "/devices/{device_id}/username",
            get(get_device_username_handler),
        )
        .route("/health", get(health_handler))
        .layer(catch_panic_layer())
        .with_state(registry_state)
}
