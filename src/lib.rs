//! DB Pool Cache Library
//!
//! This library keeps one lazily created connection pool per database target
//! (MySQL, PostgreSQL, Oracle, SQL Server) and runs ad-hoc SQL against it,
//! returning rows as maps of portable scalars.

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::{Config, PoolOptions};
pub use db::{PoolCache, QueryExecutor};
pub use error::{DbError, DbResult};
pub use models::{ConnectionParameters, DatabaseKind, RawConnectionParameters, ResultRow};
