//! Repository for device records
//!
//! A device record maps an externally supplied device id to the username that owns it.

use crate::error::DbError;

// Re-export Device from devicehub_common for convenience
pub use devicehub_common::models::Device;

/// Result of an upsert: the stored record and whether it was newly inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceUpsert {
    pub device: Device,
    pub created: bool,
}

/// Repository for device records
pub trait DeviceRepository {
    /// Create the `devices` table if it does not exist yet.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert the device or update its username.
    ///
    /// A new record gets `created_at == updated_at == now`. An existing record keeps its
    /// `created_at` and gets a fresh `updated_at`.
    ///
    /// # Errors
    ///
    /// [`DbError::IntegrityViolation`] when a table constraint rejects the values,
    /// [`DbError::QueryError`] for every other failure.
    fn upsert_device(
        &self,
        device_id: &str,
        username: &str,
    ) -> impl std::future::Future<Output = Result<DeviceUpsert, DbError>> + Send;

    /// Find a device by id.
    fn find_by_device_id(
        &self,
        device_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Device>, DbError>> + Send;
}
