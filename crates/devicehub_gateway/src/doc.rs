// --- File: crates/devicehub_gateway/src/doc.rs ---
#![cfg(feature = "openapi")]
use crate::models::{
    MessageEnvelope, MessageResponse, MessageType, ReadingAck, ReadingData, RegistrationAck,
    RegistrationData,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Message Gateway",
        version = "0.1.0",
        description = "Entry point for IoT device messages"
    ),
    paths(crate::handlers::receive_message_handler),
    components(schemas(
        MessageEnvelope,
        MessageType,
        RegistrationData,
        ReadingData,
        RegistrationAck,
        ReadingAck,
        MessageResponse
    )),
    tags((name = "Messages", description = "Registration and reading messages from devices"))
)]
pub struct GatewayApiDoc;
