// --- File: crates/devicehub_registry/src/logic.rs ---
use crate::error::RegistryError;
use devicehub_common::models::{UpsertDeviceResponse, UsernameResponse};
use devicehub_db::DeviceRepository;
use tracing::{error, info};

pub const UPSERT_SUCCESS_MESSAGE: &str = "Device updated successfully";

/// Creates the device or replaces its username.
pub async fn upsert_device<R: DeviceRepository>(
    repository: &R,
    device_id: &str,
    username: &str,
) -> Result<UpsertDeviceResponse, RegistryError> {
    if username.is_empty() {
        return Err(RegistryError::EmptyUsername);
    }

    match repository.upsert_device(device_id, username).await {
        Ok(upsert) => {
            info!(
                device_id = %device_id,
                created = upsert.created,
                "Device {} mapped to user {}",
                device_id,
                upsert.device.username
            );
            Ok(UpsertDeviceResponse {
                message: UPSERT_SUCCESS_MESSAGE.to_string(),
                device_id: upsert.device.device_id,
            })
        }
        Err(e) => {
            if e.is_integrity_violation() {
                error!("Integrity error while upserting device {}: {}", device_id, e);
            } else {
                error!("Unexpected error while upserting device {}: {}", device_id, e);
            }
            Err(RegistryError::Store(e))
        }
    }
}

/// Looks up the username registered for a device.
pub async fn get_username<R: DeviceRepository>(
    repository: &R,
    device_id: &str,
) -> Result<UsernameResponse, RegistryError> {
    match repository.find_by_device_id(device_id).await {
        Ok(Some(device)) => Ok(UsernameResponse {
            username: device.username,
        }),
        Ok(None) => {
            info!("Device {} not found", device_id);
            Err(RegistryError::DeviceNotFound(device_id.to_string()))
        }
        Err(e) => {
            error!("Error fetching username for device {}: {}", device_id, e);
            Err(RegistryError::Store(e))
        }
    }
}
