//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SHOPPING_LIST_*` environment variables and an
//! optional config file. The database URL additionally falls back to the
//! conventional `POSTGRES_URL` and `DATABASE_URL` variables, and the TLS mode
//! falls back to the URL's `sslmode` parameter.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DatabaseTls, ParseDatabaseTlsError, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Environment variables consulted, in order, when no explicit URL is set.
pub const DATABASE_URL_FALLBACKS: [&str; 2] = ["POSTGRES_URL", "DATABASE_URL"];

/// Errors raised while turning raw settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no database URL configured; set SHOPPING_LIST_DATABASE_URL, POSTGRES_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("invalid database TLS mode {value:?}; expected disable, require or verify-full")]
    InvalidDatabaseTls { value: String },
}

/// Configuration values for the shopping-list server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHOPPING_LIST")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// TLS mode for database connections: `disable`, `require` or
    /// `verify-full`.
    pub database_tls: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
}

/// Pick the first non-empty database URL from the explicit setting and then
/// the fallback variables, using `lookup` to read the environment.
fn resolve_database_url<F>(explicit: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .map(str::to_owned)
        .into_iter()
        .chain(DATABASE_URL_FALLBACKS.iter().filter_map(|name| lookup(name)))
        .find(|url| !url.trim().is_empty())
}

impl AppSettings {
    /// Resolve the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when neither the setting
    /// nor any fallback variable holds a value.
    pub fn database_url(&self) -> Result<String, ConfigError> {
        resolve_database_url(self.database_url.as_deref(), |name| {
            std::env::var(name).ok()
        })
        .ok_or(ConfigError::MissingDatabaseUrl)
    }

    /// Resolve the listen address, defaulting to `0.0.0.0:3000`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| {
            ConfigError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn pool_min_idle(&self) -> u32 {
        self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS))
    }

    /// Resolve the TLS mode for connections to `database_url`.
    ///
    /// An explicit setting wins; otherwise the URL's `sslmode` parameter is
    /// used, and TLS stays off when neither is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDatabaseTls`] when the setting names an
    /// unknown mode.
    pub fn database_tls(&self, database_url: &str) -> Result<DatabaseTls, ConfigError> {
        match self.database_tls.as_deref() {
            Some(raw) => raw
                .parse()
                .map_err(|err: ParseDatabaseTlsError| {
                    ConfigError::InvalidDatabaseTls {
                        value: err.value().to_owned(),
                    }
                }),
            None => Ok(DatabaseTls::from_url(database_url)),
        }
    }

    /// Build the connection pool configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`AppSettings::database_url`] and
    /// [`AppSettings::database_tls`] failures.
    pub fn pool_config(&self) -> Result<PoolConfig, ConfigError> {
        let database_url = self.database_url()?;
        let tls = self.database_tls(&database_url)?;
        Ok(PoolConfig::new(database_url)
            .with_tls(tls)
            .with_max_size(self.pool_max_size())
            .with_min_idle(Some(self.pool_min_idle()))
            .with_connection_timeout(self.pool_timeout()))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and fallbacks.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const ALL_VARS: [&str; 8] = [
        "SHOPPING_LIST_DATABASE_URL",
        "SHOPPING_LIST_DATABASE_TLS",
        "SHOPPING_LIST_BIND_ADDR",
        "SHOPPING_LIST_POOL_MAX_SIZE",
        "SHOPPING_LIST_POOL_MIN_IDLE",
        "SHOPPING_LIST_POOL_TIMEOUT_SECS",
        "POSTGRES_URL",
        "DATABASE_URL",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("shopping-list")])
            .expect("config should load")
    }

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        ALL_VARS
            .iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:3000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.pool_max_size(), 10);
        assert_eq!(settings.pool_min_idle(), 2);
        assert_eq!(settings.pool_timeout(), Duration::from_secs(30));
        assert_eq!(settings.database_url(), Err(ConfigError::MissingDatabaseUrl));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("SHOPPING_LIST_DATABASE_URL", "postgres://app@db/shopping"),
            ("SHOPPING_LIST_BIND_ADDR", "127.0.0.1:8080"),
            ("SHOPPING_LIST_POOL_MAX_SIZE", "4"),
            ("SHOPPING_LIST_POOL_MIN_IDLE", "1"),
            ("SHOPPING_LIST_POOL_TIMEOUT_SECS", "5"),
            ("POSTGRES_URL", "postgres://ignored@db/other"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url().as_deref(),
            Ok("postgres://app@db/shopping")
        );
        assert_eq!(
            settings.bind_addr().expect("valid address").port(),
            8080
        );
        assert_eq!(settings.pool_max_size(), 4);
        assert_eq!(settings.pool_min_idle(), 1);
        assert_eq!(settings.pool_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    #[case(&[("POSTGRES_URL", "postgres://pg@host/a"), ("DATABASE_URL", "postgres://db@host/b")], "postgres://pg@host/a")]
    #[case(&[("DATABASE_URL", "postgres://db@host/b")], "postgres://db@host/b")]
    #[case(&[("POSTGRES_URL", " "), ("DATABASE_URL", "postgres://db@host/b")], "postgres://db@host/b")]
    fn database_url_falls_back_in_order(
        #[case] overrides: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        let _guard = lock_env(env_with(overrides));

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url().as_deref(), Ok(expected));
    }

    #[rstest]
    fn resolve_prefers_explicit_value() {
        let url = resolve_database_url(Some("postgres://explicit/db"), |_| {
            Some("postgres://fallback/db".to_owned())
        });
        assert_eq!(url.as_deref(), Some("postgres://explicit/db"));
    }

    #[rstest]
    fn invalid_bind_addr_is_reported() {
        let _guard = lock_env(env_with(&[("SHOPPING_LIST_BIND_ADDR", "localhost")]));

        let err = load_from_empty_args()
            .bind_addr()
            .expect_err("hostname is not a socket address");
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }

    #[rstest]
    fn pool_config_carries_tuning() {
        let _guard = lock_env(env_with(&[
            ("DATABASE_URL", "postgres://shop:secret@db/shopping"),
            ("SHOPPING_LIST_POOL_MAX_SIZE", "3"),
        ]));

        let config = load_from_empty_args()
            .pool_config()
            .expect("pool config");
        assert_eq!(config.database_url(), "postgres://shop:secret@db/shopping");
        assert_eq!(config.tls(), DatabaseTls::Disable);
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[rstest]
    #[case(&[("DATABASE_URL", "postgres://app@db/shop?sslmode=require")], DatabaseTls::Require)]
    #[case(&[("DATABASE_URL", "postgres://app@db/shop?sslmode=verify-full")], DatabaseTls::VerifyFull)]
    #[case(
        &[
            ("DATABASE_URL", "postgres://app@db/shop?sslmode=require"),
            ("SHOPPING_LIST_DATABASE_TLS", "disable"),
        ],
        DatabaseTls::Disable
    )]
    #[case(
        &[
            ("DATABASE_URL", "postgres://app@db/shop"),
            ("SHOPPING_LIST_DATABASE_TLS", "require"),
        ],
        DatabaseTls::Require
    )]
    fn database_tls_resolves_from_setting_then_url(
        #[case] overrides: &[(&str, &str)],
        #[case] expected: DatabaseTls,
    ) {
        let _guard = lock_env(env_with(overrides));

        let config = load_from_empty_args().pool_config().expect("pool config");
        assert_eq!(config.tls(), expected);
    }

    #[rstest]
    fn unknown_database_tls_is_reported() {
        let _guard = lock_env(env_with(&[
            ("DATABASE_URL", "postgres://app@db/shop"),
            ("SHOPPING_LIST_DATABASE_TLS", "sometimes"),
        ]));

        let err = load_from_empty_args()
            .pool_config()
            .expect_err("unknown mode");
        assert_eq!(
            err,
            ConfigError::InvalidDatabaseTls {
                value: "sometimes".to_owned()
            }
        );
    }
}
