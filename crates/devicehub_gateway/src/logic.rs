// --- File: crates/devicehub_gateway/src/logic.rs ---
use devicehub_common::models::ReadingPayload;
use tracing::{error, info, warn};

use crate::error::GatewayError;
use crate::models::{
    Message, MessagePayload, MessageResponse, MessageType, ReadingAck, ReadingData,
    RegistrationAck, RegistrationData,
};
use crate::services::{DeviceDirectory, ReadingStore};

pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration processed successfully";
pub const READING_SUCCESS_MESSAGE: &str = "Reading processed successfully";
pub const NOT_STORED_MESSAGE: &str =
    "Reading processed but not stored - reading service unavailable";

/// Dispatches a validated message to its handler.
pub async fn handle_message(
    devices: &dyn DeviceDirectory,
    readings: &dyn ReadingStore,
    message: Message,
) -> Result<MessageResponse, GatewayError> {
    let Message { device_id, payload } = message;
    info!("Received {:?} message from device {}", payload.message_type(), device_id);

    match payload {
        MessagePayload::Registration(data) => handle_registration(devices, device_id, data)
            .await
            .map(MessageResponse::Registration),
        MessagePayload::Reading(data) => handle_reading(devices, readings, device_id, data)
            .await
            .map(MessageResponse::Reading),
    }
}

/// Registers the device with the registry.
pub async fn handle_registration(
    devices: &dyn DeviceDirectory,
    device_id: String,
    data: RegistrationData,
) -> Result<RegistrationAck, GatewayError> {
    if let Err(e) = devices.upsert_device(&device_id, &data.username).await {
        error!("Error processing registration for device {}: {}", device_id, e);
        return Err(GatewayError::RegistrationFailed(e));
    }

    info!("Device {} registered to user {}", device_id, data.username);
    Ok(RegistrationAck {
        message: REGISTRATION_SUCCESS_MESSAGE.to_string(),
        device_id,
        message_type: MessageType::Registration,
    })
}

/// Resolves the owner of the device and hands the reading to the store.
///
/// A store failure does not fail the message; it is reported in `storage_result`.
pub async fn handle_reading(
    devices: &dyn DeviceDirectory,
    readings: &dyn ReadingStore,
    device_id: String,
    data: ReadingData,
) -> Result<ReadingAck, GatewayError> {
    let username = match devices.get_device_username(&device_id).await {
        Ok(username) => username,
        Err(e) => {
            warn!("Could not resolve username of device {}: {}", device_id, e);
            return Err(GatewayError::DeviceNotRegistered {
                device_id,
                source: e,
            });
        }
    };

    let payload = ReadingPayload {
        device_id,
        username,
        reading: data.reading,
    };

    let storage_result = match readings.store_reading(&payload).await {
        Ok(outcome) => outcome.status_message(),
        Err(e) => {
            warn!(
                "Failed to store reading of device {}: {}",
                payload.device_id, e
            );
            NOT_STORED_MESSAGE.to_string()
        }
    };

    Ok(ReadingAck {
        message: READING_SUCCESS_MESSAGE.to_string(),
        device_id: payload.device_id,
        username: payload.username,
        reading: payload.reading,
        message_type: MessageType::Reading,
        storage_result,
    })
}
