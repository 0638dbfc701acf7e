//! Logging utilities for the devicehub services.
//!
//! Both binaries call [`init`] once at startup. Library crates only use the
//! `tracing` macros and never install a subscriber themselves.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crate targets that get a default directive at the requested level.
const DEVICEHUB_TARGETS: &[&str] = &[
    "devicehub_config",
    "devicehub_common",
    "devicehub_db",
    "devicehub_registry",
    "devicehub_gateway",
    "device_service",
    "message_gateway",
];

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use devicehub_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured; the devicehub crates additionally log at `level`
/// unless `RUST_LOG` names them explicitly. Calling this more than once is harmless.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    for target in DEVICEHUB_TARGETS {
        match format!("{}={}", target, level).parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Invalid log directive for {}: {}", target, e),
        }
    }

    // try_init so repeated calls (tests, embedded use) do not panic
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init_with_level(Level::DEBUG);
    }
}
