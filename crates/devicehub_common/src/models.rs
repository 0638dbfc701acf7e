// --- File: crates/devicehub_common/src/models.rs ---
//! Wire models shared by the registry and the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored device record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Device {
    pub device_id: String,
    pub username: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /devices/{device_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpsertDeviceRequest {
    #[cfg_attr(feature = "openapi", schema(example = "test-user"))]
    pub username: String,
}

/// Answer of `PUT /devices/{device_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpsertDeviceResponse {
    pub message: String,
    pub device_id: String,
}

/// Answer of `GET /devices/{device_id}/username`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UsernameResponse {
    pub username: String,
}

/// Reading forwarded to the reading storage service (`POST /readings`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReadingPayload {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub username: String,
    pub reading: f64,
}

/// Answer of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: String,
}
