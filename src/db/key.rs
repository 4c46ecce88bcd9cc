//! Cache key derivation.

use crate::models::{ConnectionParameters, DatabaseKind};

/// Canonical identifier of a pool target.
///
/// Identity is the (kind, username, host, port, database) tuple; the password and
/// extra properties are not part of the key. The string form
/// `kind:username@host:port:database` percent-encodes each component and is
/// only used for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    kind: DatabaseKind,
    username: String,
    host: String,
    port: Option<u16>,
    database: Option<String>,
}

impl CacheKey {
    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}@{}:",
            self.kind.as_str(),
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.host)
        )?;
        if let Some(port) = self.port {
            write!(f, "{}", port)?;
        }
        write!(
            f,
            ":{}",
            urlencoding::encode(self.database.as_deref().unwrap_or_default())
        )
    }
}

/// Derive the cache key for a target.
pub fn derive_key(
    kind: DatabaseKind,
    username: &str,
    host: &str,
    port: Option<u16>,
    database: Option<&str>,
) -> CacheKey {
    CacheKey {
        kind,
        username: username.to_string(),
        host: host.to_string(),
        port,
        database: database.map(str::to_string),
    }
}

impl From<&ConnectionParameters> for CacheKey {
    fn from(params: &ConnectionParameters) -> Self {
        derive_key(
            params.kind(),
            params.username(),
            params.host(),
            params.port(),
            params.database(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let key = derive_key(
            DatabaseKind::MySql,
            "root",
            "127.0.0.1",
            Some(3306),
            Some("test"),
        );
        assert_eq!(key.to_string(), "mysql:root@127.0.0.1:3306:test");
    }

    #[test]
    fn test_key_without_port_and_database() {
        let key = derive_key(DatabaseKind::PostgreSql, "app", "db", None, None);
        assert_eq!(key.to_string(), "postgresql:app@db::");
        assert_eq!(key.port(), None);
        assert_eq!(key.database(), None);
    }

    #[test]
    fn test_key_ignores_password_and_properties() {
        let a = ConnectionParameters::new(DatabaseKind::MySql, "h", "u", "one")
            .with_port(3306)
            .with_properties("charset=utf8mb4");
        let b = ConnectionParameters::new(DatabaseKind::MySql, "h", "u", "two").with_port(3306);
        assert_eq!(CacheKey::from(&a), CacheKey::from(&b));
    }

    #[test]
    fn test_key_distinguishes_identifying_fields() {
        let base = ConnectionParameters::new(DatabaseKind::MySql, "h", "u", "pw")
            .with_port(3306)
            .with_database("a");
        let variants = [
            ConnectionParameters::new(DatabaseKind::PostgreSql, "h", "u", "pw")
                .with_port(3306)
                .with_database("a"),
            ConnectionParameters::new(DatabaseKind::MySql, "h2", "u", "pw")
                .with_port(3306)
                .with_database("a"),
            ConnectionParameters::new(DatabaseKind::MySql, "h", "u2", "pw")
                .with_port(3306)
                .with_database("a"),
            ConnectionParameters::new(DatabaseKind::MySql, "h", "u", "pw")
                .with_port(3307)
                .with_database("a"),
            ConnectionParameters::new(DatabaseKind::MySql, "h", "u", "pw")
                .with_port(3306)
                .with_database("b"),
        ];
        for other in &variants {
            assert_ne!(CacheKey::from(&base), CacheKey::from(other), "{other:?}");
        }
    }

    #[test]
    fn test_separator_characters_do_not_merge_targets() {
        let user_with_at = derive_key(DatabaseKind::MySql, "admin@srv", "db.example", None, None);
        let host_with_at = derive_key(DatabaseKind::MySql, "admin", "srv@db.example", None, None);
        assert_ne!(user_with_at, host_with_at);
        assert_ne!(user_with_at.to_string(), host_with_at.to_string());

        let db_with_colon = derive_key(DatabaseKind::MySql, "u", "h", None, Some("5:x"));
        let host_with_colon = derive_key(DatabaseKind::MySql, "u", "h:", Some(5), Some("x"));
        assert_ne!(db_with_colon, host_with_colon);
        assert_ne!(db_with_colon.to_string(), host_with_colon.to_string());
    }

    #[test]
    fn test_legacy_oracle_key_differs_from_oracle() {
        let a = derive_key(DatabaseKind::Oracle, "u", "h", Some(1521), Some("ORCL"));
        let b = derive_key(DatabaseKind::OracleLegacy, "u", "h", Some(1521), Some("ORCL"));
        assert_ne!(a, b);
    }
}
