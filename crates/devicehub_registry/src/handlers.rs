// --- File: crates/devicehub_registry/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use devicehub_common::models::{
    HealthResponse, UpsertDeviceRequest, UpsertDeviceResponse, UsernameResponse,
};
use devicehub_common::{json_rejection, DevicehubError};
use devicehub_db::SqlDeviceRepository;
use std::sync::Arc;
use tracing::warn;

use crate::logic::{get_username, upsert_device};

// --- State for Registry Handlers ---
#[derive(Clone)]
pub struct RegistryState {
    pub repository: SqlDeviceRepository,
}

/// Creates the device or updates its username.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/devices/{device_id}",
    params(("device_id" = String, Path, description = "Externally assigned device identifier")),
    request_body = UpsertDeviceRequest,
    responses(
        (status = 200, description = "Device created or updated", body = UpsertDeviceResponse),
        (status = 400, description = "Empty username or database integrity error"),
        (status = 422, description = "Malformed request body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Devices"
))]
pub async fn upsert_device_handler(
    State(state): State<Arc<RegistryState>>,
    Path(device_id): Path<String>,
    payload: Result<Json<UpsertDeviceRequest>, JsonRejection>,
) -> Result<Json<UpsertDeviceResponse>, DevicehubError> {
    let Json(request) = payload.map_err(json_rejection)?;

    let response = upsert_device(&state.repository, &device_id, &request.username).await?;
    Ok(Json(response))
}

/// Returns the username registered for a device.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/devices/{device_id}/username",
    params(("device_id" = String, Path, description = "Externally assigned device identifier")),
    responses(
        (status = 200, description = "Username of the device owner", body = UsernameResponse),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Devices"
))]
pub async fn get_device_username_handler(
    State(state): State<Arc<RegistryState>>,
    Path(device_id): Path<String>,
) -> Result<Json<UsernameResponse>, DevicehubError> {
    let response = get_username(&state.repository, &device_id).await?;
    Ok(Json(response))
}

/// Reports whether the database answers.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable")
    ),
    tag = "Health"
))]
pub async fn health_handler(
    State(state): State<Arc<RegistryState>>,
) -> Result<Json<HealthResponse>, DevicehubError> {
    if state.repository.db_client().is_healthy().await {
        Ok(Json(HealthResponse {
            status: "ok".to_string(),
        }))
    } else {
        warn!("Health check failed: database unreachable");
        Err(DevicehubError::ServiceUnavailable(
            "Database unavailable".to_string(),
        ))
    }
}
