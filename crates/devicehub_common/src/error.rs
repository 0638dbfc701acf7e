// --- File: crates/devicehub_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all devicehub errors.
///
/// Each crate keeps its own error enum and implements `From<SpecificError> for DevicehubError`,
/// so handlers can use `?` and still produce a consistent HTTP error body.
#[derive(Error, Debug)]
pub enum DevicehubError {
    /// Request content was rejected before reaching the database
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Request body could not be deserialized into the expected shape
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// A dependency of the service is not usable right now
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DevicehubError {
    /// The message exposed to HTTP clients, without the category prefix used in logs.
    pub fn public_message(&self) -> &str {
        match self {
            DevicehubError::ValidationError(message)
            | DevicehubError::UnprocessableEntity(message)
            | DevicehubError::NotFoundError(message)
            | DevicehubError::ServiceUnavailable(message)
            | DevicehubError::InternalError(message) => message,
            DevicehubError::ExternalServiceError { message, .. } => message,
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for DevicehubError {
    fn status_code(&self) -> u16 {
        match self {
            DevicehubError::ValidationError(_) => 400,
            DevicehubError::UnprocessableEntity(_) => 422,
            DevicehubError::ExternalServiceError { .. } => 502,
            DevicehubError::NotFoundError(_) => 404,
            DevicehubError::ServiceUnavailable(_) => 503,
            DevicehubError::InternalError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> DevicehubError {
    DevicehubError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> DevicehubError {
    DevicehubError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> DevicehubError {
    DevicehubError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> DevicehubError {
    DevicehubError::InternalError(message.to_string())
}
