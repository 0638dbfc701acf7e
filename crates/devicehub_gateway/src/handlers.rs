// --- File: crates/devicehub_gateway/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use devicehub_common::{json_rejection, DevicehubError};
use std::sync::Arc;

use crate::logic::handle_message;
use crate::models::{Message, MessageResponse};
use crate::services::{DeviceDirectory, ReadingStore};

// --- State for Gateway Handlers ---
#[derive(Clone)]
pub struct GatewayState {
    pub devices: Arc<dyn DeviceDirectory>,
    pub readings: Arc<dyn ReadingStore>,
}

/// Validates an IoT message and forwards it according to its type.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/messages",
    request_body = crate::models::MessageEnvelope,
    responses(
        (status = 200, description = "Message processed", body = MessageResponse),
        (status = 404, description = "Reading from a device that is not registered"),
        (status = 422, description = "Malformed message or unknown type"),
        (status = 500, description = "Internal server error"),
        (status = 502, description = "Device service rejected or did not answer the registration")
    ),
    tag = "Messages"
))]
pub async fn receive_message_handler(
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<Message>, JsonRejection>,
) -> Result<Json<MessageResponse>, DevicehubError> {
    let Json(message) = payload.map_err(json_rejection)?;

    let response = handle_message(state.devices.as_ref(), state.readings.as_ref(), message).await?;
    Ok(Json(response))
}
