// --- File: crates/devicehub_common/src/services.rs ---
//! Service abstractions.
//!
//! Traits over outbound dependencies return boxed futures so they stay object safe and
//! handlers can hold them as `Arc<dyn Trait>`.

use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;
