// --- File: crates/devicehub_gateway/src/services.rs ---
//! Outbound dependencies of the gateway.
//!
//! The HTTP clients implement these traits; tests substitute in-process fakes.

use devicehub_common::models::{ReadingPayload, UpsertDeviceResponse};
use devicehub_common::BoxFuture;

use crate::error::ClientError;
use crate::reading_client::StoreOutcome;

/// Device id to username registry.
pub trait DeviceDirectory: Send + Sync {
    /// Create or update the device record.
    fn upsert_device<'a>(
        &'a self,
        device_id: &'a str,
        username: &'a str,
    ) -> BoxFuture<'a, UpsertDeviceResponse, ClientError>;

    /// Username registered for the device. Unknown devices are an error.
    fn get_device_username<'a>(&'a self, device_id: &'a str) -> BoxFuture<'a, String, ClientError>;
}

/// Best-effort storage for readings.
pub trait ReadingStore: Send + Sync {
    /// Store the reading, or skip it when the store is known to be unavailable.
    fn store_reading<'a>(
        &'a self,
        reading: &'a ReadingPayload,
    ) -> BoxFuture<'a, StoreOutcome, ClientError>;
}
