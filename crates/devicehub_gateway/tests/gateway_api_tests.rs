use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use devicehub_common::models::{ReadingPayload, UpsertDeviceResponse};
use devicehub_common::BoxFuture;
use devicehub_gateway::handlers::GatewayState;
use devicehub_gateway::{
    routes_with_state, ClientError, DeviceDirectory, ReadingStore, StoreOutcome,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

// --- In-process fakes ---

#[derive(Default)]
struct FakeDirectory {
    devices: Mutex<HashMap<String, String>>,
    offline: bool,
}

impl FakeDirectory {
    fn with_device(device_id: &str, username: &str) -> Self {
        let directory = Self::default();
        directory
            .devices
            .lock()
            .unwrap()
            .insert(device_id.to_string(), username.to_string());
        directory
    }

    fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn unreachable() -> ClientError {
        ClientError::Status {
            status: 503,
            body: "registry down".to_string(),
        }
    }
}

impl DeviceDirectory for FakeDirectory {
    fn upsert_device<'a>(
        &'a self,
        device_id: &'a str,
        username: &'a str,
    ) -> BoxFuture<'a, UpsertDeviceResponse, ClientError> {
        Box::pin(async move {
            if self.offline {
                return Err(Self::unreachable());
            }
            self.devices
                .lock()
                .unwrap()
                .insert(device_id.to_string(), username.to_string());
            Ok(UpsertDeviceResponse {
                message: "Device updated successfully".to_string(),
                device_id: device_id.to_string(),
            })
        })
    }

    fn get_device_username<'a>(&'a self, device_id: &'a str) -> BoxFuture<'a, String, ClientError> {
        Box::pin(async move {
            if self.offline {
                return Err(Self::unreachable());
            }
            self.devices
                .lock()
                .unwrap()
                .get(device_id)
                .cloned()
                .ok_or(ClientError::Status {
                    status: 404,
                    body: format!("Device {} not found", device_id),
                })
        })
    }
}

enum StoreBehaviour {
    Skip,
    Store(Option<&'static str>),
    Fail,
    Panic,
}

struct FakeStore {
    behaviour: StoreBehaviour,
    received: Mutex<Vec<ReadingPayload>>,
}

impl FakeStore {
    fn new(behaviour: StoreBehaviour) -> Self {
        Self {
            behaviour,
            received: Mutex::new(Vec::new()),
        }
    }
}

impl ReadingStore for FakeStore {
    fn store_reading<'a>(
        &'a self,
        reading: &'a ReadingPayload,
    ) -> BoxFuture<'a, StoreOutcome, ClientError> {
        Box::pin(async move {
            self.received.lock().unwrap().push(reading.clone());
            match self.behaviour {
                StoreBehaviour::Skip => Ok(StoreOutcome::Skipped),
                StoreBehaviour::Store(message) => Ok(StoreOutcome::Stored {
                    message: message.map(str::to_string),
                }),
                StoreBehaviour::Fail => Err(ClientError::Status {
                    status: 500,
                    body: "disk full".to_string(),
                }),
                StoreBehaviour::Panic => panic!("reading store exploded"),
            }
        })
    }
}

// --- Helpers ---

fn app(directory: FakeDirectory, store: Arc<FakeStore>) -> Router {
    routes_with_state(GatewayState {
        devices: Arc::new(directory),
        readings: store,
    })
}

async fn post_message(app: &Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/messages")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

// --- Registration ---

#[tokio::test]
async fn test_registration_is_forwarded() {
    let store = Arc::new(FakeStore::new(StoreBehaviour::Skip));
    let app = app(FakeDirectory::default(), store);

    let message = json!({"deviceId": "1", "type": "registration", "data": {"username": "test-user"}});
    let (status, body) = post_message(&app, &message.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Registration processed successfully",
            "deviceId": "1",
            "type": "registration"
        })
    );
}

#[tokio::test]
async fn test_registration_with_registry_down_is_bad_gateway() {
    let store = Arc::new(FakeStore::new(StoreBehaviour::Skip));
    let app = app(FakeDirectory::offline(), store);

    let message = json!({"deviceId": "1", "type": "registration", "data": {"username": "u"}});
    let (status, body) = post_message(&app, &message.to_string()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["error"]["message"],
        "Failed to process registration with device service"
    );
}

// --- Readings ---

#[tokio::test]
async fn test_reading_for_unregistered_device_is_not_found() {
    let store = Arc::new(FakeStore::new(StoreBehaviour::Store(None)));
    let app = app(FakeDirectory::default(), store.clone());

    let message = json!({"deviceId": "d9", "type": "reading", "data": {"reading": 1.0}});
    let (status, body) = post_message(&app, &message.to_string()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"]["message"],
        "Device d9 not found or not registered"
    );
    assert!(store.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_reading_with_registry_down_is_not_found() {
    let store = Arc::new(FakeStore::new(StoreBehaviour::Store(None)));
    let app = app(FakeDirectory::offline(), store);

    let message = json!({"deviceId": "d1", "type": "reading", "data": {"reading": 1.0}});
    let (status, _) = post_message(&app, &message.to_string()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reading_skipped_when_store_unavailable() {
    let store = Arc::new(FakeStore::new(StoreBehaviour::Skip));
    let app = app(FakeDirectory::with_device("d1", "alice"), store);

    let message = json!({"deviceId": "d1", "type": "reading", "data": {"reading": 99.9}});
    let (status, body) = post_message(&app, &message.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Reading processed successfully",
            "deviceId": "d1",
            "username": "alice",
            "reading": 99.9,
            "type": "reading",
            "storage_result": "Reading service not available, reading skipped"
        })
    );
}

#[tokio::test]
async fn test_reading_stored_reports_store_message() {
    let store = Arc::new(FakeStore::new(StoreBehaviour::Store(Some("Reading saved"))));
    let app = app(FakeDirectory::with_device("d1", "alice"), store.clone());

    let message = json!({"deviceId": "d1", "type": "reading", "data": {"reading": 21.5}});
    let (status, body) = post_message(&app, &message.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage_result"], "Reading saved");
    assert_eq!(
        store.received.lock().unwrap().as_slice(),
        &[ReadingPayload {
            device_id: "d1".to_string(),
            username: "alice".to_string(),
            reading: 21.5,
        }]
    );
}

#[tokio::test]
async fn test_store_failure_is_swallowed() {
    let store = Arc::new(FakeStore::new(StoreBehaviour::Fail));
    let app = app(FakeDirectory::with_device("d1", "alice"), store);

    let message = json!({"deviceId": "d1", "type": "reading", "data": {"reading": 3.0}});
    let (status, body) = post_message(&app, &message.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Reading processed successfully");
    assert_eq!(
        body["storage_result"],
        "Reading processed but not stored - reading service unavailable"
    );
}

// --- Validation and failures ---

#[tokio::test]
async fn test_invalid_messages_are_unprocessable() {
    let store = Arc::new(FakeStore::new(StoreBehaviour::Skip));
    let app = app(FakeDirectory::with_device("1", "u"), store);

    let invalid = [
        json!({"deviceId": "1", "type": "invalid", "data": {"username": "u"}}).to_string(),
        json!({"deviceId": "1", "type": "registration", "data": {"reading": 1.0}}).to_string(),
        json!({"deviceId": "1", "type": "reading", "data": {}}).to_string(),
        json!({"type": "reading", "data": {"reading": 1.0}}).to_string(),
        "{\"deviceId\": ".to_string(),
    ];

    for body in invalid {
        let (status, response) = post_message(&app, &body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
        assert_eq!(response["error"]["code"], 422);
    }
}

#[tokio::test]
async fn test_panic_in_dispatch_is_internal_error() {
    let store = Arc::new(FakeStore::new(StoreBehaviour::Panic));
    let app = app(FakeDirectory::with_device("d1", "alice"), store);

    let message = json!({"deviceId": "d1", "type": "reading", "data": {"reading": 1.0}});
    let (status, body) = post_message(&app, &message.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Internal server error");
}
