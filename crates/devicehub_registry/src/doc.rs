// --- File: crates/devicehub_registry/src/doc.rs ---
#![cfg(feature = "openapi")]
use devicehub_common::models::{
    HealthResponse, UpsertDeviceRequest, UpsertDeviceResponse, UsernameResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Device Service",
        version = "0.1.0",
        description = "Maps device ids to the username that owns them"
    ),
    paths(
        crate::handlers::upsert_device_handler,
        crate::handlers::get_device_username_handler,
        crate::handlers::health_handler
    ),
    components(schemas(
        UpsertDeviceRequest,
        UpsertDeviceResponse,
        UsernameResponse,
        HealthResponse
    )),
    tags(
        (name = "Devices", description = "Device to username registry"),
        (name = "Health", description = "Liveness of the service and its database")
    )
)]
pub struct RegistryApiDoc;
