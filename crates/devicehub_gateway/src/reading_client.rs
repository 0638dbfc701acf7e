// --- File: crates/devicehub_gateway/src/reading_client.rs ---
//! Client for the optional reading storage service.
//!
//! Availability is probed once per process with `GET {base}/docs` and cached. While the
//! service is considered unavailable, readings are acknowledged as skipped without any
//! network call.

use devicehub_common::models::ReadingPayload;
use devicehub_common::{create_client, BoxFuture, DEFAULT_TIMEOUT_SECS, PROBE_TIMEOUT_SECS};
use devicehub_config::AppConfig;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{debug, info, warn};

use crate::device_client::{join_segments, parse_base_url};
use crate::error::{ensure_success, ClientError};
use crate::services::ReadingStore;

pub const SKIPPED_MESSAGE: &str = "Reading service not available, reading skipped";
pub const STORED_DEFAULT_MESSAGE: &str = "Stored successfully";

/// Cached reachability of the reading service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Availability {
    Unknown = 0,
    Available = 1,
    Unavailable = 2,
}

impl Availability {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Availability::Available,
            2 => Availability::Unavailable,
            _ => Availability::Unknown,
        }
    }
}

/// What happened to a reading handed to [`ReadingServiceClient::store_reading`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    /// The service accepted the reading; `message` is its acknowledgement, if any
    Stored { message: Option<String> },
    /// The service is unavailable and was not called
    Skipped,
}

impl StoreOutcome {
    /// Text reported to the sender as `storage_result`.
    pub fn status_message(&self) -> String {
        match self {
            StoreOutcome::Stored { message: Some(message) } => message.clone(),
            StoreOutcome::Stored { message: None } => STORED_DEFAULT_MESSAGE.to_string(),
            StoreOutcome::Skipped => SKIPPED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StoreReadingResponse {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the reading storage service.
#[derive(Debug)]
pub struct ReadingServiceClient {
    base_url: Option<Url>,
    client: Client,
    probe_client: Client,
    availability: AtomicU8,
}

impl ReadingServiceClient {
    /// Creates a client; `None` means the service is never available.
    pub fn new(base_url: Option<&str>) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client: create_client(DEFAULT_TIMEOUT_SECS, true)?,
            probe_client: create_client(PROBE_TIMEOUT_SECS, false)?,
            availability: AtomicU8::new(Availability::Unknown as u8),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(config.reading_service_url())
    }

    /// The cached availability, without probing.
    pub fn availability(&self) -> Availability {
        Availability::from_u8(self.availability.load(Ordering::Acquire))
    }

    /// Returns the cached availability, probing the service the first time.
    ///
    /// Only a `200 OK` from `GET {base}/docs` counts as available. The result is kept for
    /// the lifetime of the client.
    pub async fn check_availability(&self) -> bool {
        match self.availability() {
            Availability::Available => return true,
            Availability::Unavailable => return false,
            Availability::Unknown => {}
        }

        let available = self.probe().await;
        let state = if available {
            Availability::Available
        } else {
            Availability::Unavailable
        };
        self.availability.store(state as u8, Ordering::Release);
        info!("Reading service availability: {:?}", state);
        available
    }

    async fn probe(&self) -> bool {
        let Some(base) = self.base_url.as_ref() else {
            info!("No reading service configured");
            return false;
        };
        let url = match join_segments(base, &["docs"]) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot build reading service probe URL: {}", e);
                return false;
            }
        };

        debug!("Probing reading service at {}", url);
        match self.probe_client.get(url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                warn!("Reading service probe failed: {}", e);
                false
            }
        }
    }

    /// Forwards the reading with `POST {base}/readings`, or skips it when unavailable.
    pub async fn store_reading(&self, reading: &ReadingPayload) -> Result<StoreOutcome, ClientError> {
        if !self.check_availability().await {
            debug!("Skipping reading of device {}", reading.device_id);
            return Ok(StoreOutcome::Skipped);
        }

        let base = self
            .base_url
            .as_ref()
            .ok_or(ClientError::NotConfigured("reading service"))?;
        let url = join_segments(base, &["readings"])?;

        let response = self.client.post(url).json(reading).send().await?;
        let response = ensure_success(response).await?;
        let body = response.json::<StoreReadingResponse>().await?;

        Ok(StoreOutcome::Stored {
            message: body.message,
        })
    }
}

impl ReadingStore for ReadingServiceClient {
    fn store_reading<'a>(
        &'a self,
        reading: &'a ReadingPayload,
    ) -> BoxFuture<'a, StoreOutcome, ClientError> {
        Box::pin(ReadingServiceClient::store_reading(self, reading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(StoreOutcome::Skipped.status_message(), SKIPPED_MESSAGE);
        assert_eq!(
            StoreOutcome::Stored { message: None }.status_message(),
            STORED_DEFAULT_MESSAGE
        );
        assert_eq!(
            StoreOutcome::Stored {
                message: Some("saved as #12".to_string())
            }
            .status_message(),
            "saved as #12"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_service_is_unavailable() {
        let client = ReadingServiceClient::new(None).unwrap();
        assert_eq!(client.availability(), Availability::Unknown);

        assert!(!client.check_availability().await);
        assert_eq!(client.availability(), Availability::Unavailable);

        let reading = ReadingPayload {
            device_id: "d1".to_string(),
            username: "alice".to_string(),
            reading: 1.5,
        };
        assert_eq!(
            client.store_reading(&reading).await.unwrap(),
            StoreOutcome::Skipped
        );
    }
}
