//! Repository modules for database access

pub mod device;
pub mod device_sql;

pub use device::{Device, DeviceRepository, DeviceUpsert};
pub use device_sql::SqlDeviceRepository;
