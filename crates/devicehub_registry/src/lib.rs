// --- File: crates/devicehub_registry/src/lib.rs ---
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use error::RegistryError;
pub use routes::{routes, routes_with_repository};
