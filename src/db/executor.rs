//! Query execution engine.
//!
//! Resolves the cached pool for a target, borrows one connection, runs the SQL
//! text as-is and normalizes every row before the connection goes back to the pool.
//!
//! # Architecture
//!
//! The executor uses database-specific implementations organized in submodules:
//! - `mysql`: MySQL-specific fetch
//! - `postgres`: PostgreSQL-specific fetch
//! - `sqlite`: SQLite-specific fetch
//! - `mssql`: SQL Server fetch over a deadpool-managed tiberius client
//! - `oracle_rows`: Oracle fetch on the blocking thread pool
//!
//! Each submodule provides identical functionality adapted to the database's type system.

use crate::db::cache::PoolCache;
use crate::db::pool::DbPool;
use crate::db::types::ToResultRow;
use crate::error::{DbError, DbResult};
use crate::models::{ConnectionParameters, ResultRow};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runs SQL against cached pools.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    cache: Arc<PoolCache>,
}

impl QueryExecutor {
    pub fn new(cache: Arc<PoolCache>) -> Self {
        Self { cache }
    }

    /// The pool cache this executor draws connections from.
    pub fn cache(&self) -> &Arc<PoolCache> {
        &self.cache
    }

    /// Execute a statement and return every row it produces.
    ///
    /// The SQL text is passed to the driver unchanged; literal `%` characters need
    /// no escaping. Statements that produce no result set return an empty list.
    ///
    /// Failures are reported as [`DbError::PoolAcquisition`] when no connection could
    /// be obtained and [`DbError::QueryExecution`] when the database rejected the
    /// statement. Parameter problems surface before any I/O as
    /// [`DbError::ConnectionBuild`].
    pub async fn run_query(
        &self,
        sql: &str,
        params: &ConnectionParameters,
    ) -> DbResult<Vec<ResultRow>> {
        let resource = self.cache.get_or_create(params)?;
        let start = Instant::now();

        debug!(
            key = %resource.key(),
            resource_id = resource.id(),
            sql = %sql,
            "Executing query"
        );

        let rows = match resource.pool() {
            DbPool::MySql(p) => mysql::fetch_rows(p, sql).await?,
            DbPool::Postgres(p) => postgres::fetch_rows(p, sql).await?,
            DbPool::MsSql(p) => mssql::fetch_rows(p, sql).await?,
            DbPool::Oracle(p) => oracle_rows::fetch_rows(p, sql).await?,
            DbPool::SQLite(p) => sqlite::fetch_rows(p, sql).await?,
        };

        info!(
            key = %resource.key(),
            row_count = rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query completed"
        );

        Ok(rows)
    }
}

// =============================================================================
// Database-Specific Implementations
// =============================================================================
//
// The connection is held only inside `fetch_rows`; rows are fully materialized and
// converted before it is dropped, which returns it to the pool.

mod mysql {
    use super::*;
    use sqlx::{Executor, MySqlPool};

    pub async fn fetch_rows(pool: &MySqlPool, sql: &str) -> DbResult<Vec<ResultRow>> {
        let mut conn = pool.acquire().await.map_err(DbError::from_acquire)?;
        let rows = (&mut *conn).fetch_all(sql).await.map_err(DbError::from)?;
        Ok(rows.iter().map(ToResultRow::to_result_row).collect())
    }
}

mod postgres {
    use super::*;
    use sqlx::{Executor, PgPool};

    pub async fn fetch_rows(pool: &PgPool, sql: &str) -> DbResult<Vec<ResultRow>> {
        let mut conn = pool.acquire().await.map_err(DbError::from_acquire)?;
        let rows = (&mut *conn).fetch_all(sql).await.map_err(DbError::from)?;
        Ok(rows.iter().map(ToResultRow::to_result_row).collect())
    }
}

mod sqlite {
    use super::*;
    use sqlx::{Executor, SqlitePool};

    pub async fn fetch_rows(pool: &SqlitePool, sql: &str) -> DbResult<Vec<ResultRow>> {
        let mut conn = pool.acquire().await.map_err(DbError::from_acquire)?;
        let rows = (&mut *conn).fetch_all(sql).await.map_err(DbError::from)?;
        Ok(rows.iter().map(ToResultRow::to_result_row).collect())
    }
}

mod mssql {
    use super::*;
    use crate::db::tds::MssqlPool;

    pub async fn fetch_rows(pool: &MssqlPool, sql: &str) -> DbResult<Vec<ResultRow>> {
        let mut conn = pool.get().await.map_err(DbError::from)?;
        let rows = conn.simple_query(sql).await?.into_first_result().await?;
        Ok(rows.iter().map(ToResultRow::to_result_row).collect())
    }
}

mod oracle_rows {
    use super::*;
    use crate::db::oci::OraclePool;

    pub async fn fetch_rows(pool: &OraclePool, sql: &str) -> DbResult<Vec<ResultRow>> {
        let conn = pool.get().await.map_err(DbError::from)?;
        let sql = sql.to_string();

        tokio::task::spawn_blocking(move || -> DbResult<Vec<ResultRow>> {
            let mut stmt = conn.statement(&sql).build()?;
            if !stmt.is_query() {
                stmt.execute(&[])?;
                conn.commit()?;
                return Ok(Vec::new());
            }
            let mut rows = Vec::new();
            for row in stmt.query(&[])? {
                rows.push(row?.to_result_row());
            }
            Ok(rows)
        })
        .await
        .map_err(|e| DbError::internal(format!("Oracle query task failed: {}", e)))?
    }
}
