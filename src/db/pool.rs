//! Connection pool construction.
//!
//! This module provides connection pooling functionality using database-specific
//! pools (MySqlPool, PgPool, SqlitePool from sqlx; deadpool pools for SQL Server and
//! Oracle) to ensure full type support. Pools are created lazily: no connection is
//! opened until the first acquire.

use crate::config::PoolOptions;
use crate::db::key::CacheKey;
use crate::db::oci::{self, OraclePool};
use crate::db::tds::{self, MssqlPool};
use crate::db::url::{has_property, mask_password};
use crate::error::{DbError, DbResult};
use crate::models::DatabaseKind;
use sqlx::{
    MySqlPool, PgPool, SqlitePool, mysql::MySqlConnectOptions, mysql::MySqlPoolOptions,
    postgres::PgConnectOptions, postgres::PgPoolOptions,
};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::debug;

/// Database-specific connection pool (avoids AnyPool limitations).
#[derive(Clone)]
pub enum DbPool {
    MySql(MySqlPool),
    Postgres(PgPool),
    MsSql(MssqlPool),
    Oracle(OraclePool),
    /// Embedded file databases, produced by custom factories.
    SQLite(SqlitePool),
}

impl DbPool {
    /// Close the connection pool.
    pub async fn close(&self) {
        match self {
            DbPool::MySql(pool) => pool.close().await,
            DbPool::Postgres(pool) => pool.close().await,
            DbPool::MsSql(pool) => pool.close(),
            DbPool::Oracle(pool) => pool.close(),
            DbPool::SQLite(pool) => pool.close().await,
        }
    }

    /// Number of connections currently open (idle or in use).
    pub fn size(&self) -> u32 {
        match self {
            DbPool::MySql(pool) => pool.size(),
            DbPool::Postgres(pool) => pool.size(),
            DbPool::MsSql(pool) => pool.status().size as u32,
            DbPool::Oracle(pool) => pool.status().size as u32,
            DbPool::SQLite(pool) => pool.size(),
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            DbPool::MySql(_) => "MySql",
            DbPool::Postgres(_) => "Postgres",
            DbPool::MsSql(_) => "MsSql",
            DbPool::Oracle(_) => "Oracle",
            DbPool::SQLite(_) => "SQLite",
        }
    }
}

impl std::fmt::Debug for DbPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbPool")
            .field("backend", &self.variant_name())
            .field("size", &self.size())
            .finish()
    }
}

/// Creates the pool behind a new cache entry.
///
/// Implementations must not perform network I/O: the cache calls `create_pool`
/// while holding its creation lock.
pub trait PoolFactory: Send + Sync {
    fn create_pool(&self, kind: DatabaseKind, url: &str, options: &PoolOptions)
    -> DbResult<DbPool>;
}

/// Default factory: sqlx lazy pools for MySQL and PostgreSQL, deadpool pools for
/// SQL Server and Oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPoolFactory;

impl PoolFactory for DefaultPoolFactory {
    fn create_pool(
        &self,
        kind: DatabaseKind,
        url: &str,
        options: &PoolOptions,
    ) -> DbResult<DbPool> {
        debug!(kind = %kind, url = %mask_password(url), "Creating lazy pool");

        match kind {
            DatabaseKind::MySql => {
                let mut connect = MySqlConnectOptions::from_str(url).map_err(|e| {
                    DbError::connection_build(format!("Invalid MySQL connection URL: {}", e))
                })?;
                // Explicit charset properties win over the default
                if !has_property(url, "charset") {
                    connect = connect.charset("utf8mb4");
                }

                let pool = MySqlPoolOptions::new()
                    .min_connections(options.min_connections_or_default())
                    .max_connections(options.max_connections_or_default())
                    .max_lifetime(options.max_lifetime_or_default())
                    .acquire_timeout(options.acquire_timeout_or_default())
                    .test_before_acquire(options.test_before_acquire_or_default())
                    .connect_lazy_with(connect);
                Ok(DbPool::MySql(pool))
            }
            DatabaseKind::PostgreSql => {
                let connect = PgConnectOptions::from_str(url).map_err(|e| {
                    DbError::connection_build(format!("Invalid PostgreSQL connection URL: {}", e))
                })?;

                let pool = PgPoolOptions::new()
                    .min_connections(options.min_connections_or_default())
                    .max_connections(options.max_connections_or_default())
                    .max_lifetime(options.max_lifetime_or_default())
                    .acquire_timeout(options.acquire_timeout_or_default())
                    .test_before_acquire(options.test_before_acquire_or_default())
                    .connect_lazy_with(connect);
                Ok(DbPool::Postgres(pool))
            }
            DatabaseKind::MsSql => Ok(DbPool::MsSql(tds::create_pool(url, options)?)),
            DatabaseKind::Oracle | DatabaseKind::OracleLegacy => {
                Ok(DbPool::Oracle(oci::create_pool(kind, url, options)?))
            }
        }
    }
}

static NEXT_RESOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// A pool owned by one cache entry.
pub struct PooledResource {
    id: u64,
    key: CacheKey,
    kind: DatabaseKind,
    pool: DbPool,
    created_at: Instant,
}

impl PooledResource {
    pub(crate) fn new(key: CacheKey, kind: DatabaseKind, pool: DbPool) -> Self {
        Self {
            id: NEXT_RESOURCE_ID.fetch_add(1, Ordering::Relaxed),
            key,
            kind,
            pool,
            created_at: Instant::now(),
        }
    }

    /// Process-unique identity of this resource.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

impl std::fmt::Debug for PooledResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledResource")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
