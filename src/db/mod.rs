//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Cache key derivation
//! - Connection URL construction
//! - Lazy pool construction (sqlx, tiberius and oracle backends) and the keyed pool cache
//! - Query execution
//! - Type mappings

pub mod cache;
pub mod executor;
pub mod key;
pub mod oci;
pub mod pool;
pub mod tds;
pub mod types;
pub mod url;

pub use cache::PoolCache;
pub use executor::QueryExecutor;
pub use key::{CacheKey, derive_key};
pub use pool::{DbPool, PoolFactory, PooledResource, DefaultPoolFactory};
pub use self::url::{build_url, build_url_parts, has_property, mask_password};
