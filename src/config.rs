//! Configuration handling for the pool cache.
//!
//! This module provides pool tuning options and the command-line configuration of the
//! `db-pool-query` binary (CLI arguments and environment variables).

use crate::error::{DbError, DbResult};
use crate::models::{ConnectionParameters, RawConnectionParameters};
use clap::Parser;
use std::time::Duration;

// Pool configuration defaults
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 0;
/// Connections older than this are closed and replaced on release.
pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Connection pool configuration options applied to every pool the cache creates.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PoolOptions {
    /// Maximum connections in pool (default: 10)
    pub max_connections: Option<u32>,
    /// Connections kept open while idle (default: 0)
    pub min_connections: Option<u32>,
    /// Connection recycle age in seconds (default: 1800)
    pub max_lifetime_secs: Option<u64>,
    /// Connection acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: Option<u64>,
    /// Whether to test connections before use (default: true)
    pub test_before_acquire: Option<bool>,
}

impl PoolOptions {
    /// Get max_connections with default value.
    pub fn max_connections_or_default(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Get min_connections with default value.
    pub fn min_connections_or_default(&self) -> u32 {
        self.min_connections.unwrap_or(DEFAULT_MIN_CONNECTIONS)
    }

    /// Get the connection recycle age.
    pub fn max_lifetime_or_default(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs.unwrap_or(DEFAULT_MAX_LIFETIME_SECS))
    }

    /// Get acquire_timeout with default value.
    pub fn acquire_timeout_or_default(&self) -> Duration {
        Duration::from_secs(
            self.acquire_timeout_secs
                .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        )
    }

    /// Get test_before_acquire with default value.
    pub fn test_before_acquire_or_default(&self) -> bool {
        self.test_before_acquire.unwrap_or(true)
    }

    /// Validate pool options and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(max) = self.max_connections {
            if max == 0 {
                return Err("max_connections must be greater than 0".to_string());
            }
        }
        if let Some(min) = self.min_connections {
            let max = self.max_connections_or_default();
            if min > max {
                return Err(format!(
                    "min_connections ({}) cannot exceed max_connections ({})",
                    min, max
                ));
            }
        }
        if self.max_lifetime_secs == Some(0) {
            return Err("max_lifetime must be greater than 0".to_string());
        }
        if self.acquire_timeout_secs == Some(0) {
            return Err("acquire_timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Configuration for the `db-pool-query` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "db-pool-query",
    about = "Run a read query through a cached, pooled database connection",
    version,
    author
)]
pub struct Config {
    /// Database backend: mysql, oracle, oracle11g, postgresql or mssql
    #[arg(short = 'k', long, env = "DB_TYPE")]
    pub kind: String,

    /// Database server host
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "DB_HOST")]
    pub host: String,

    /// Database server port (defaults to the backend's standard port)
    #[arg(short = 'P', long, env = "DB_PORT")]
    pub port: Option<String>,

    /// Login user
    #[arg(short = 'u', long, env = "DB_USERNAME")]
    pub username: String,

    /// Login password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Database (schema/service) name
    #[arg(short = 'd', long, env = "DB_NAME")]
    pub database: Option<String>,

    /// Extra driver properties as a raw query string, e.g. "charset=utf8mb4"
    #[arg(long, env = "DB_PROPERTIES")]
    pub properties: Option<String>,

    /// Maximum connections per pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS, env = "DB_MAX_CONNECTIONS")]
    pub max_connections: u32,

    /// Connection recycle age in seconds
    #[arg(long, default_value_t = DEFAULT_MAX_LIFETIME_SECS, env = "DB_MAX_LIFETIME")]
    pub max_lifetime: u64,

    /// Connection acquire timeout in seconds
    #[arg(long, default_value_t = DEFAULT_ACQUIRE_TIMEOUT_SECS, env = "DB_ACQUIRE_TIMEOUT")]
    pub acquire_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "DB_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "DB_JSON_LOGS")]
    pub json_logs: bool,

    /// SQL statement to run
    #[arg(value_name = "SQL")]
    pub sql: String,
}

impl Config {
    /// Build validated connection parameters from the configured values.
    pub fn connection_parameters(&self) -> DbResult<ConnectionParameters> {
        ConnectionParameters::try_from(RawConnectionParameters {
            kind: self.kind.clone(),
            host: self.host.clone(),
            port: self.port.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            properties: self.properties.clone(),
        })
    }

    /// Pool options from the configured values.
    pub fn pool_options(&self) -> DbResult<PoolOptions> {
        let options = PoolOptions {
            max_connections: Some(self.max_connections),
            min_connections: None,
            max_lifetime_secs: Some(self.max_lifetime),
            acquire_timeout_secs: Some(self.acquire_timeout),
            test_before_acquire: None,
        };
        options.validate().map_err(DbError::connection_build)?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DatabaseKind;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["db-pool-query"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_pool_options_defaults() {
        let opts = PoolOptions::default();
        assert_eq!(opts.max_connections_or_default(), 10);
        assert_eq!(opts.min_connections_or_default(), 0);
        assert_eq!(opts.max_lifetime_or_default(), Duration::from_secs(1800));
        assert_eq!(opts.acquire_timeout_or_default(), Duration::from_secs(30));
        assert!(opts.test_before_acquire_or_default());
    }

    #[test]
    fn test_pool_options_validation_max_zero() {
        let opts = PoolOptions {
            max_connections: Some(0),
            ..Default::default()
        };
        assert!(opts.validate().unwrap_err().contains("max_connections"));
    }

    #[test]
    fn test_pool_options_validation_min_exceeds_default_max() {
        let opts = PoolOptions {
            min_connections: Some(11),
            ..Default::default()
        };
        let err = opts.validate().unwrap_err();
        assert!(err.contains("cannot exceed"));
    }

    #[test]
    fn test_pool_options_validation_zero_lifetime() {
        let opts = PoolOptions {
            max_lifetime_secs: Some(0),
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_config_connection_parameters() {
        let config = parse(&[
            "--kind",
            "mysql",
            "--host",
            "db.internal",
            "--port",
            "3307",
            "--username",
            "root",
            "--password",
            "pw",
            "--database",
            "test",
            "SELECT 1 AS test",
        ]);

        let params = config.connection_parameters().unwrap();
        assert_eq!(params.kind(), DatabaseKind::MySql);
        assert_eq!(params.host(), "db.internal");
        assert_eq!(params.port(), Some(3307));
        assert_eq!(params.database(), Some("test"));
        assert_eq!(config.sql, "SELECT 1 AS test");
    }

    #[test]
    fn test_config_rejects_unknown_kind() {
        let config = parse(&["--kind", "nosql", "--username", "root", "SELECT 1"]);
        assert!(matches!(
            config.connection_parameters(),
            Err(DbError::UnsupportedBackend { .. })
        ));
    }

    #[test]
    fn test_config_pool_options() {
        let config = parse(&[
            "-k",
            "postgresql",
            "-u",
            "app",
            "--max-connections",
            "4",
            "--max-lifetime",
            "900",
            "SELECT 1",
        ]);
        let opts = config.pool_options().unwrap();
        assert_eq!(opts.max_connections_or_default(), 4);
        assert_eq!(opts.max_lifetime_or_default(), Duration::from_secs(900));
        assert_eq!(opts.acquire_timeout_or_default(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_pool_options_invalid() {
        let config = parse(&["-k", "mysql", "-u", "root", "--max-connections", "0", "SELECT 1"]);
        assert!(matches!(
            config.pool_options(),
            Err(DbError::ConnectionBuild { .. })
        ));
    }
}
