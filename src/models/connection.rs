//! Connection-related data models.
//!
//! This module defines the backend kinds and the connection parameters that identify
//! a pool target.

use crate::error::{DbError, DbResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseKind {
    /// Includes MariaDB
    MySql,
    Oracle,
    /// Oracle 11g and older, which need the thick client library
    OracleLegacy,
    PostgreSql,
    MsSql,
}

impl DatabaseKind {
    /// Canonical lowercase name, used in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Oracle => "oracle",
            Self::OracleLegacy => "oracle_legacy",
            Self::PostgreSql => "postgresql",
            Self::MsSql => "mssql",
        }
    }

    /// URL scheme understood by the driver for this backend.
    pub fn driver_scheme(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Oracle | Self::OracleLegacy => "oracle",
            Self::PostgreSql => "postgres",
            Self::MsSql => "mssql",
        }
    }

    /// Get the display name for this backend.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::Oracle => "Oracle",
            Self::OracleLegacy => "Oracle (legacy client)",
            Self::PostgreSql => "PostgreSQL",
            Self::MsSql => "SQL Server",
        }
    }

    /// Get the default port for this backend.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::MySql => 3306,
            Self::Oracle | Self::OracleLegacy => 1521,
            Self::PostgreSql => 5432,
            Self::MsSql => 1433,
        }
    }
}

impl FromStr for DatabaseKind {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "oracle" => Ok(Self::Oracle),
            "oracle_legacy" | "oracle11g" => Ok(Self::OracleLegacy),
            "postgresql" | "postgres" => Ok(Self::PostgreSql),
            "mssql" | "sqlserver" => Ok(Self::MsSql),
            _ => Err(DbError::unsupported_backend(s)),
        }
    }
}

impl std::fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters identifying one backend target. Immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParameters {
    kind: DatabaseKind,
    host: String,
    port: Option<u16>,
    username: String,
    /// Contains sensitive data - never log
    password: String,
    database: Option<String>,
    properties: Option<String>,
}

impl ConnectionParameters {
    /// Create parameters for a target without port, database or extra properties.
    pub fn new(
        kind: DatabaseKind,
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            host: host.into(),
            port: None,
            username: username.into(),
            password: password.into(),
            database: None,
            properties: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = non_empty(database.into());
        self
    }

    /// Raw query-string suffix handed to the driver, without the leading `?`.
    pub fn with_properties(mut self, properties: impl Into<String>) -> Self {
        self.properties = non_empty(properties.into());
        self
    }

    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Port to connect to, falling back to the backend default.
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or_else(|| self.kind.default_port())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn properties(&self) -> Option<&str> {
        self.properties.as_deref()
    }
}

impl std::fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"****")
            .field("database", &self.database)
            .field("properties", &self.properties)
            .finish()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Untyped connection settings as handed over by a calling framework.
///
/// Field names follow the credential form of the calling plugin; both the plain
/// names and their `db_` prefixed variants are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConnectionParameters {
    #[serde(alias = "db_type")]
    pub kind: String,
    #[serde(alias = "db_host")]
    pub host: String,
    #[serde(default, alias = "db_port", deserialize_with = "port_as_string")]
    pub port: Option<String>,
    #[serde(alias = "db_username")]
    pub username: String,
    #[serde(default, alias = "db_password")]
    pub password: String,
    #[serde(default, alias = "db_name")]
    pub database: Option<String>,
    #[serde(default, alias = "extra_properties")]
    pub properties: Option<String>,
}

/// Accept the port either as a JSON number or as an integer-like string.
fn port_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u64),
        Text(String),
    }

    Ok(
        Option::<PortValue>::deserialize(deserializer)?.map(|value| match value {
            PortValue::Number(n) => n.to_string(),
            PortValue::Text(s) => s,
        }),
    )
}

impl TryFrom<RawConnectionParameters> for ConnectionParameters {
    type Error = DbError;

    fn try_from(raw: RawConnectionParameters) -> DbResult<Self> {
        let kind = raw.kind.parse::<DatabaseKind>()?;

        let mut params = ConnectionParameters::new(kind, raw.host, raw.username, raw.password);

        if let Some(port) = raw.port.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            let port = port.parse::<u16>().map_err(|_| {
                DbError::connection_build(format!("Port must be an integer in 1-65535, got '{port}'"))
            })?;
            if port == 0 {
                return Err(DbError::connection_build("Port must be greater than 0"));
            }
            params = params.with_port(port);
        }
        if let Some(database) = raw.database {
            params = params.with_database(database);
        }
        if let Some(properties) = raw.properties {
            params = params.with_properties(properties);
        }

        Ok(params)
    }
}
