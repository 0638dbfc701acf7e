// --- File: crates/devicehub_gateway/src/device_client.rs ---
use devicehub_common::models::{UpsertDeviceRequest, UpsertDeviceResponse, UsernameResponse};
use devicehub_common::{create_client, BoxFuture, DEFAULT_TIMEOUT_SECS};
use devicehub_config::AppConfig;
use reqwest::{Client, Url};
use tracing::{debug, error};

use crate::error::{ensure_success, ClientError};
use crate::services::DeviceDirectory;

const SERVICE_NAME: &str = "device service";

/// Parses an optional base URL, keeping `None` when nothing is configured.
pub(crate) fn parse_base_url(base_url: Option<&str>) -> Result<Option<Url>, ClientError> {
    base_url
        .map(|raw| Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e))))
        .transpose()
}

/// Appends percent-encoded path segments to a base URL.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// HTTP client for the device registry.
#[derive(Debug, Clone)]
pub struct DeviceServiceClient {
    base_url: Option<Url>,
    client: Client,
}

impl DeviceServiceClient {
    /// Creates a client with a 30 second timeout. `None` yields a client whose every call
    /// fails with [`ClientError::NotConfigured`].
    pub fn new(base_url: Option<&str>) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client: create_client(DEFAULT_TIMEOUT_SECS, true)?,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(config.device_service_url())
    }

    fn device_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let base = self
            .base_url
            .as_ref()
            .ok_or(ClientError::NotConfigured(SERVICE_NAME))?;
        join_segments(base, segments)
    }

    /// `PUT /devices/{device_id}`
    pub async fn upsert_device(
        &self,
        device_id: &str,
        username: &str,
    ) -> Result<UpsertDeviceResponse, ClientError> {
        let url = self.device_url(&["devices", device_id])?;
        debug!("Upserting device {} at {}", device_id, url);

        let body = UpsertDeviceRequest {
            username: username.to_string(),
        };
        let response = self
            .client
            .put(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Device service unreachable: {}", e);
                ClientError::Request(e)
            })?;
        let response = ensure_success(response).await?;

        Ok(response.json::<UpsertDeviceResponse>().await?)
    }

    /// `GET /devices/{device_id}/username`
    pub async fn get_device_username(&self, device_id: &str) -> Result<String, ClientError> {
        let url = self.device_url(&["devices", device_id, "username"])?;
        debug!("Resolving username of device {} at {}", device_id, url);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Device service unreachable: {}", e);
            ClientError::Request(e)
        })?;
        let response = ensure_success(response).await?;

        let body = response.json::<UsernameResponse>().await?;
        Ok(body.username)
    }
}

impl DeviceDirectory for DeviceServiceClient {
    fn upsert_device<'a>(
        &'a self,
        device_id: &'a str,
        username: &'a str,
    ) -> BoxFuture<'a, UpsertDeviceResponse, ClientError> {
        Box::pin(DeviceServiceClient::upsert_device(self, device_id, username))
    }

    fn get_device_username<'a>(&'a self, device_id: &'a str) -> BoxFuture<'a, String, ClientError> {
        Box::pin(DeviceServiceClient::get_device_username(self, device_id))
    }
}
