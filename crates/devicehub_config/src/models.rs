// --- File: crates/devicehub_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String, // DATABASE_URL or DEVICEHUB__DATABASE__URL
    #[serde(default)]
    pub max_connections: Option<u32>,
}

// --- Upstream HTTP service (device registry, reading storage) ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UpstreamConfig {
    pub base_url: String, // e.g. DEVICE_SERVICE_URL / READING_SERVICE_URL
}

// --- CORS ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: crate::DEFAULT_CORS_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Optional sections, only the services that need them read them ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub device_service: Option<UpstreamConfig>,
    #[serde(default)]
    pub reading_service: Option<UpstreamConfig>,

    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Base URL of the device registry, without a trailing slash.
    pub fn device_service_url(&self) -> Option<&str> {
        self.device_service
            .as_ref()
            .map(|upstream| upstream.base_url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    /// Base URL of the reading storage service, without a trailing slash.
    pub fn reading_service_url(&self) -> Option<&str> {
        self.reading_service
            .as_ref()
            .map(|upstream| upstream.base_url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}
