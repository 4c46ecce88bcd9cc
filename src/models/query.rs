//! Query result models.

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Format used for date-time values in result rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used for date-only values in result rows.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for time-of-day values in result rows.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One result row: column name to normalized scalar.
pub type ResultRow = serde_json::Map<String, JsonValue>;

/// Diagnostic view of one pool cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntrySummary {
    /// Cache key, e.g. `mysql:root@127.0.0.1:3306:test`
    pub key: String,
    /// Process-unique identity of the pooled resource.
    pub resource_id: u64,
    pub kind: crate::models::DatabaseKind,
    /// Seconds since the pool was created.
    pub age_secs: u64,
    /// Connections currently open in the pool.
    pub open_connections: u32,
}
