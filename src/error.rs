//! Error types for the pool cache and query executor.
//!
//! This module defines all error types using `thiserror` for ergonomic error handling.
//! Each variant carries enough context for the caller to decide whether a retry makes sense.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Unsupported database backend: {kind}")]
    UnsupportedBackend { kind: String },

    #[error("Invalid connection parameters: {message}")]
    ConnectionBuild { message: String },

    #[error("Failed to acquire connection: {message}")]
    PoolAcquisition { message: String, suggestion: String },

    #[error("Query execution failed: {message}")]
    QueryExecution {
        message: String,
        /// e.g., "42P01" for undefined table
        sql_state: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create an unsupported backend error naming the rejected value.
    pub fn unsupported_backend(kind: impl Into<String>) -> Self {
        Self::UnsupportedBackend { kind: kind.into() }
    }

    /// Create a connection build error.
    pub fn connection_build(message: impl Into<String>) -> Self {
        Self::ConnectionBuild {
            message: message.into(),
        }
    }

    /// Create a pool acquisition error with a helpful suggestion.
    pub fn pool_acquisition(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::PoolAcquisition {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a query execution error with optional SQL state.
    pub fn query_execution(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::QueryExecution {
            message: message.into(),
            sql_state,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::PoolAcquisition { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PoolAcquisition { .. })
    }

    /// Classify an error raised while checking a connection out of a pool.
    pub fn from_acquire(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DbError::pool_acquisition(
                "Timed out waiting for a pooled connection",
                "The pool may be exhausted; retry with backoff",
            ),
            sqlx::Error::PoolClosed => {
                DbError::pool_acquisition("Connection pool is closed", "Restart the process")
            }
            sqlx::Error::Io(io_err) => DbError::pool_acquisition(
                format!("I/O error: {}", io_err),
                "Check network connectivity and database server status",
            ),
            sqlx::Error::Tls(tls_err) => DbError::pool_acquisition(
                format!("TLS error: {}", tls_err),
                "Verify TLS configuration and certificates",
            ),
            sqlx::Error::Configuration(msg) => DbError::pool_acquisition(
                msg.to_string(),
                "Check the connection parameters and credentials",
            ),
            sqlx::Error::Database(db_err) => DbError::pool_acquisition(
                db_err.message().to_string(),
                "Verify the username, password and database name",
            ),
            other => DbError::pool_acquisition(
                other.to_string(),
                "Check that the database server is running and accessible",
            ),
        }
    }
}

/// Convert sqlx errors raised during statement execution to DbError.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DbError::query_execution(db_err.message(), code)
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => DbError::from_acquire(err),
            sqlx::Error::ColumnDecode { index, source } => DbError::query_execution(
                format!("Failed to decode column {}: {}", index, source),
                None,
            ),
            sqlx::Error::Protocol(msg) => {
                DbError::query_execution(format!("Protocol error: {}", msg), None)
            }
            sqlx::Error::WorkerCrashed => DbError::internal("Database worker crashed"),
            other => DbError::query_execution(other.to_string(), None),
        }
    }
}

/// Convert SQL Server errors raised during statement execution to DbError.
impl From<tiberius::error::Error> for DbError {
    fn from(err: tiberius::error::Error) -> Self {
        match err {
            tiberius::error::Error::Server(token) => {
                DbError::query_execution(token.message(), Some(token.code().to_string()))
            }
            tiberius::error::Error::Io { message, .. } => DbError::pool_acquisition(
                format!("I/O error: {}", message),
                "Check network connectivity and database server status",
            ),
            other => DbError::query_execution(other.to_string(), None),
        }
    }
}

/// Convert Oracle errors raised during statement execution to DbError.
impl From<oracle::Error> for DbError {
    fn from(err: oracle::Error) -> Self {
        DbError::query_execution(err.to_string(), None)
    }
}

/// Convert deadpool checkout failures (SQL Server and Oracle pools) to DbError.
impl From<deadpool::managed::PoolError<DbError>> for DbError {
    fn from(err: deadpool::managed::PoolError<DbError>) -> Self {
        use deadpool::managed::PoolError;

        match err {
            PoolError::Backend(e) => e,
            PoolError::Timeout(_) => DbError::pool_acquisition(
                "Timed out waiting for a pooled connection",
                "The pool may be exhausted or the server unreachable; retry with backoff",
            ),
            PoolError::Closed => {
                DbError::pool_acquisition("Connection pool is closed", "Restart the process")
            }
            other => DbError::pool_acquisition(
                other.to_string(),
                "Check that the database server is running and accessible",
            ),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_backend_names_value() {
        let err = DbError::unsupported_backend("nosql");
        assert!(err.to_string().contains("nosql"));
    }

    #[test]
    fn test_error_suggestion() {
        let err = DbError::pool_acquisition("refused", "Check the server");
        assert_eq!(err.suggestion(), Some("Check the server"));
        assert_eq!(DbError::connection_build("bad").suggestion(), None);
    }

    #[test]
    fn test_error_retryable() {
        assert!(DbError::pool_acquisition("timeout", "retry").is_retryable());
        assert!(!DbError::unsupported_backend("nosql").is_retryable());
        assert!(!DbError::connection_build("empty host").is_retryable());
        assert!(!DbError::query_execution("syntax error", None).is_retryable());
    }

    #[test]
    fn test_pool_timeout_maps_to_acquisition() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::PoolAcquisition { .. }));
    }

    #[test]
    fn test_row_not_found_maps_to_execution() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::QueryExecution { sql_state: None, .. }));
    }

    #[test]
    fn test_deadpool_errors_map_to_acquisition() {
        use deadpool::managed::{PoolError, TimeoutType};

        let err = DbError::from(PoolError::<DbError>::Timeout(TimeoutType::Wait));
        assert!(matches!(err, DbError::PoolAcquisition { .. }));

        let backend = DbError::pool_acquisition("refused", "Check the server");
        let err = DbError::from(PoolError::Backend(backend));
        assert_eq!(err.suggestion(), Some("Check the server"));
    }

    #[test]
    fn test_io_error_on_acquire() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = DbError::from_acquire(sqlx::Error::Io(io));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("refused"));
    }
}
