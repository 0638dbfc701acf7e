//! Environment variable handling for the devicehub services.
//!
//! Configuration keys can be set with the prefixed, nested naming pattern
//! (`DEVICEHUB__SERVER__PORT`) understood by the `config` crate, or with the
//! plain variable names the services have always used (`DATABASE_URL`,
//! `DEVICE_SERVICE_URL`, ...). This module owns both naming patterns.

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "DEVICEHUB";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Plain environment variables and the configuration path each one overrides.
///
/// These take priority over every other source.
pub const LEGACY_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("DEVICE_SERVICE_URL", "device_service.base_url"),
    ("READING_SERVICE_URL", "reading_service.base_url"),
    ("PORT", "server.port"),
];

/// Resolve the legacy overrides against an environment lookup.
///
/// Empty values are treated as unset so that `DEVICE_SERVICE_URL=` in a
/// `.env` file does not produce an unusable base URL.
pub fn legacy_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    LEGACY_OVERRIDES
        .iter()
        .filter_map(|(var, path)| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*path, value))
        })
        .collect()
}
