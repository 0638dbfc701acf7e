// --- File: crates/devicehub_gateway/src/models.rs ---
//! Inbound message model and gateway responses.
//!
//! A [`Message`] is only constructed when its `data` matches its `type`, so dispatch never
//! sees an inconsistent payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminator of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Registration,
    Reading,
}

/// `data` of a registration message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegistrationData {
    pub username: String,
}

/// `data` of a reading message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReadingData {
    pub reading: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessagePayload {
    Registration(RegistrationData),
    Reading(ReadingData),
}

impl MessagePayload {
    pub fn message_type(&self) -> MessageType {
        match self {
            MessagePayload::Registration(_) => MessageType::Registration,
            MessagePayload::Reading(_) => MessageType::Reading,
        }
    }
}

/// Wire shape of `POST /messages`, before `data` is checked against `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageEnvelope {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// `{"username": string}` for registrations, `{"reading": number}` for readings
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: Value,
}

/// A validated inbound message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "MessageEnvelope")]
pub struct Message {
    pub device_id: String,
    pub payload: MessagePayload,
}

impl TryFrom<MessageEnvelope> for Message {
    type Error = serde_json::Error;

    fn try_from(envelope: MessageEnvelope) -> Result<Self, Self::Error> {
        let payload = match envelope.message_type {
            MessageType::Registration => {
                MessagePayload::Registration(serde_json::from_value(envelope.data)?)
            }
            MessageType::Reading => MessagePayload::Reading(serde_json::from_value(envelope.data)?),
        };

        Ok(Message {
            device_id: envelope.device_id,
            payload,
        })
    }
}

/// Answer to a registration message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegistrationAck {
    pub message: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
}

/// Answer to a reading message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReadingAck {
    pub message: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub username: String,
    pub reading: f64,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub storage_result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum MessageResponse {
    Registration(RegistrationAck),
    Reading(ReadingAck),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<Message, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_registration_message() {
        let message = parse(json!({
            "deviceId": "1",
            "type": "registration",
            "data": {"username": "test-user"}
        }))
        .unwrap();

        assert_eq!(message.device_id, "1");
        assert_eq!(
            message.payload,
            MessagePayload::Registration(RegistrationData {
                username: "test-user".to_string()
            })
        );
        assert_eq!(message.payload.message_type(), MessageType::Registration);
    }

    #[test]
    fn test_reading_accepts_integers_and_ignores_extra_fields() {
        let message = parse(json!({
            "deviceId": "d1",
            "type": "reading",
            "data": {"reading": 42, "unit": "C"},
            "sentAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(
            message.payload,
            MessagePayload::Reading(ReadingData { reading: 42.0 })
        );
    }

    #[test]
    fn test_rejected_shapes() {
        let rejected = [
            json!({"deviceId": "1", "type": "invalid", "data": {"username": "u"}}),
            json!({"deviceId": "1", "type": "registration", "data": {"reading": 1.0}}),
            json!({"deviceId": "1", "type": "reading", "data": {"username": "u"}}),
            json!({"deviceId": "1", "type": "reading", "data": {"reading": "hot"}}),
            json!({"deviceId": "1", "type": "registration"}),
            json!({"type": "registration", "data": {"username": "u"}}),
            json!({"deviceId": 1, "type": "registration", "data": {"username": "u"}}),
        ];

        for value in rejected {
            assert!(parse(value.clone()).is_err(), "accepted {value}");
        }
    }

    #[test]
    fn test_reading_ack_shape() {
        let ack = MessageResponse::Reading(ReadingAck {
            message: "Reading processed successfully".to_string(),
            device_id: "d1".to_string(),
            username: "alice".to_string(),
            reading: 99.9,
            message_type: MessageType::Reading,
            storage_result: "Stored successfully".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&ack).unwrap(),
            json!({
                "message": "Reading processed successfully",
                "deviceId": "d1",
                "username": "alice",
                "reading": 99.9,
                "type": "reading",
                "storage_result": "Stored successfully"
            })
        );
    }
}
