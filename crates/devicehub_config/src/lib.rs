//! Configuration for the devicehub services.
//!
//! Both binaries load an [`AppConfig`] through [`load_config_with_defaults`].
//! Sources, lowest priority first:
//!
//! 1. built-in defaults (listen address, local SQLite file, CORS origins)
//! 2. optional `config/default.*` and `config/{RUN_ENV}.*` files
//! 3. `DEVICEHUB__SECTION__KEY` environment variables
//! 4. the plain variables listed in [`env_vars::LEGACY_OVERRIDES`]

use config::{Config, ConfigError, Environment, File, Map};
use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;

pub mod env_vars;
pub mod models;

pub use models::*;

/// Database used when neither `DATABASE_URL` nor a config file names one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://device_service.db";

/// Browser origins allowed by default (local frontend dev servers).
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];

/// Loads the configuration, using `server` as the listen address unless a
/// source overrides it.
pub fn load_config_with_defaults(server: &ServerConfig) -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    build_config(server, None, |key| env::var(key).ok())
}

/// Builds the configuration from the given sources.
///
/// `env_source` replaces the process environment for the prefixed variables
/// and `lookup` resolves the plain ones; tests pass explicit maps for both.
pub fn build_config<F>(
    server: &ServerConfig,
    env_source: Option<Map<String, String>>,
    lookup: F,
) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let run_env = lookup("RUN_ENV").unwrap_or_else(|| "debug".to_string());
    debug!("Loading configuration for RUN_ENV={}", run_env);

    let environment = Environment::with_prefix(env_vars::DEFAULT_PREFIX)
        .separator(env_vars::CONFIG_SEPARATOR)
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
        .source(env_source);

    let mut builder = Config::builder()
        .set_default("server.host", server.host.clone())?
        .set_default("server.port", i64::from(server.port))?
        .set_default("database.url", DEFAULT_DATABASE_URL)?
        .set_default("cors.allowed_origins", DEFAULT_CORS_ORIGINS.to_vec())?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(environment);

    for (path, value) in env_vars::legacy_overrides(&lookup) {
        debug!("Overriding {} from plain environment variable", path);
        builder = builder.set_override(path, value)?;
    }

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` when set, otherwise `.env` in the working
/// directory. A missing file is not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ServerConfig {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8001,
        }
    }

    fn env_map(pairs: &[(&str, &str)]) -> Map<String, String> {
        let mut map = Map::new();
        for (key, value) in pairs {
            map.insert(key.to_string(), value.to_string());
        }
        map
    }

    #[test]
    fn test_defaults_apply_without_environment() {
        let config = build_config(&defaults(), Some(Map::new()), |_| None).unwrap();

        assert_eq!(config.server, defaults());
        assert_eq!(
            config.database.as_ref().map(|db| db.url.as_str()),
            Some(DEFAULT_DATABASE_URL)
        );
        assert!(config.device_service.is_none());
        assert!(config.reading_service.is_none());
        assert_eq!(config.cors, CorsConfig::default());
    }

    #[test]
    fn test_prefixed_environment_overrides_defaults() {
        let env = env_map(&[
            ("DEVICEHUB__SERVER__PORT", "9100"),
            ("DEVICEHUB__DEVICE_SERVICE__BASE_URL", "http://registry:8001/"),
            ("DEVICEHUB__CORS__ALLOWED_ORIGINS", "https://a.example,https://b.example"),
        ]);

        let config = build_config(&defaults(), Some(env), |_| None).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.device_service_url(), Some("http://registry:8001"));
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_plain_variables_take_priority() {
        let env = env_map(&[("DEVICEHUB__DATABASE__URL", "sqlite://prefixed.db")]);
        let plain = env_map(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("READING_SERVICE_URL", "http://readings:9000"),
            ("PORT", "8123"),
        ]);

        let config = build_config(&defaults(), Some(env), |key| plain.get(key).cloned()).unwrap();

        assert_eq!(config.database.as_ref().unwrap().url, "sqlite::memory:");
        assert_eq!(config.reading_service_url(), Some("http://readings:9000"));
        assert_eq!(config.server.port, 8123);
    }
}
