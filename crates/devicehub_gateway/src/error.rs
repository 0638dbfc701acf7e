// --- File: crates/devicehub_gateway/src/error.rs ---
use devicehub_common::{external_service_error, not_found, DevicehubError};
use reqwest::Response;
use thiserror::Error;

pub const REGISTRATION_FAILED_MESSAGE: &str = "Failed to process registration with device service";

/// Errors of the outbound clients (device registry, reading service).
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure, timeout or undecodable body
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream answered with a non-success status
    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// No base URL is configured for the upstream
    #[error("No base URL configured for the {0}")]
    NotConfigured(&'static str),

    /// The configured base URL cannot carry path segments
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Errors of the message dispatch.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The device registry rejected or did not answer the registration
    #[error("Failed to process registration with device service: {0}")]
    RegistrationFailed(#[source] ClientError),

    /// The username of the device could not be resolved
    #[error("Device {device_id} not found or not registered")]
    DeviceNotRegistered {
        device_id: String,
        #[source]
        source: ClientError,
    },
}

impl From<GatewayError> for DevicehubError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::RegistrationFailed(_) => {
                external_service_error("device-service", REGISTRATION_FAILED_MESSAGE)
            }
            GatewayError::DeviceNotRegistered { device_id, .. } => not_found(format!(
                "Device {} not found or not registered",
                device_id
            )),
        }
    }
}

/// Passes a success response through and turns anything else into [`ClientError::Status`].
pub async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}
