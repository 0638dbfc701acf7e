// --- File: crates/devicehub_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities and middleware
pub mod logging; // Logging utilities
pub mod models; // Shared wire models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    external_service_error, internal_error, not_found, validation_error, DevicehubError,
    HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, DEFAULT_TIMEOUT_SECS, PROBE_TIMEOUT_SECS},
    error_response, json_rejection,
    layers::{catch_panic_layer, cors_layer, panic_response, with_http_layers},
    IntoHttpResponse,
};

pub use services::BoxFuture;
