// --- File: crates/devicehub_registry/src/error.rs ---
use devicehub_common::{internal_error, not_found, validation_error, DevicehubError};
use devicehub_db::DbError;
use thiserror::Error;

/// Registry-specific error types.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The username in the request body is empty
    #[error("Username must not be empty")]
    EmptyUsername,

    /// No record exists for the device id
    #[error("Device {0} not found")]
    DeviceNotFound(String),

    /// The store failed
    #[error(transparent)]
    Store(#[from] DbError),
}

impl From<RegistryError> for DevicehubError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::EmptyUsername => validation_error(RegistryError::EmptyUsername),
            RegistryError::DeviceNotFound(device_id) => {
                not_found(RegistryError::DeviceNotFound(device_id))
            }
            RegistryError::Store(e) if e.is_integrity_violation() => {
                validation_error("Database integrity error")
            }
            RegistryError::Store(_) => internal_error("Internal server error"),
        }
    }
}
