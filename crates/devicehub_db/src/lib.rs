//! Device registry store for devicehub
//!
//! This crate provides a database client that is designed to be database agnostic,
//! using SQLx's `Any` driver. SQLite is compiled in by default; PostgreSQL is
//! available through the `postgres` feature.
//!
//! # Example
//!
//! ```rust,no_run
//! use devicehub_db::{DbClient, DeviceRepository, SqlDeviceRepository};
//!
//! async fn setup() -> Result<SqlDeviceRepository, devicehub_db::error::DbError> {
//!     let client = DbClient::from_url("sqlite://device_service.db").await?;
//!     let repository = SqlDeviceRepository::new(client);
//!     repository.init_schema().await?;
//!     Ok(repository)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::{Device, DeviceRepository, DeviceUpsert, SqlDeviceRepository};
