// --- File: crates/devicehub_gateway/src/lib.rs ---
pub mod device_client;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod reading_client;
pub mod routes;
pub mod services;

pub use device_client::DeviceServiceClient;
pub use error::{ClientError, GatewayError};
pub use reading_client::{Availability, ReadingServiceClient, StoreOutcome};
pub use routes::{routes, routes_with_state};
pub use services::{DeviceDirectory, ReadingStore};
