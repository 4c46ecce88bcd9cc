//! Keyed cache of lazily created connection pools.
//!
//! # Concurrency
//!
//! - Lookups take a read lock on the map and return a cloned `Arc`
//! - Creation runs under a single `Mutex` with a re-check of the map after
//!   acquiring it, so concurrent callers for one key construct exactly one pool
//! - Neither lock is held across an await point; pool construction is synchronous
//!   and does not touch the network
//!
//! Entries are never evicted. The cache grows with the number of distinct targets
//! for as long as it lives.

use crate::config::PoolOptions;
use crate::db::key::CacheKey;
use crate::db::pool::{PoolFactory, PooledResource, DefaultPoolFactory};
use crate::db::url::{build_url, mask_password};
use crate::error::DbResult;
use crate::models::{CacheEntrySummary, ConnectionParameters};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info};

pub struct PoolCache {
    pools: RwLock<HashMap<CacheKey, Arc<PooledResource>>>,
    /// Serializes the check-create-insert sequence.
    create_lock: Mutex<()>,
    factory: Arc<dyn PoolFactory>,
    options: PoolOptions,
}

impl PoolCache {
    /// Create an empty cache using sqlx pools with default options.
    pub fn new() -> Self {
        Self::with_factory(Arc::new(DefaultPoolFactory), PoolOptions::default())
    }

    /// Create an empty cache using sqlx pools with the given options.
    pub fn with_options(options: PoolOptions) -> Self {
        Self::with_factory(Arc::new(DefaultPoolFactory), options)
    }

    /// Create an empty cache with a custom pool factory.
    pub fn with_factory(factory: Arc<dyn PoolFactory>, options: PoolOptions) -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
            create_lock: Mutex::new(()),
            factory,
            options,
        }
    }

    /// Options applied to every pool this cache creates.
    pub fn options(&self) -> &PoolOptions {
        &self.options
    }

    /// Get the pool for these parameters, creating it on first use.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn get_or_create(&self, params: &ConnectionParameters) -> DbResult<Arc<PooledResource>> {
        let key = CacheKey::from(params);

        if let Some(resource) = self.lookup(&key) {
            debug!(key = %key, resource_id = resource.id(), "Reusing connection pool");
            return Ok(resource);
        }

        let _creating = self
            .create_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Double-check after acquiring the creation lock
        if let Some(resource) = self.lookup(&key) {
            debug!(key = %key, resource_id = resource.id(), "Reusing connection pool");
            return Ok(resource);
        }

        let url = build_url(params)?;
        let pool = self
            .factory
            .create_pool(params.kind(), &url, &self.options)?;
        let resource = Arc::new(PooledResource::new(key.clone(), params.kind(), pool));

        self.pools
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), Arc::clone(&resource));

        info!(
            key = %key,
            resource_id = resource.id(),
            url = %mask_password(&url),
            max_connections = self.options.max_connections_or_default(),
            max_lifetime_secs = self.options.max_lifetime_or_default().as_secs(),
            "Created new connection pool"
        );

        Ok(resource)
    }

    /// Get the pool for these parameters if one has been created.
    pub fn get(&self, params: &ConnectionParameters) -> Option<Arc<PooledResource>> {
        self.lookup(&CacheKey::from(params))
    }

    /// List every cached entry with its resource identity, ordered by key.
    pub fn list_cache_entries(&self) -> Vec<CacheEntrySummary> {
        let pools = self.pools.read().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<CacheEntrySummary> = pools
            .iter()
            .map(|(key, resource)| CacheEntrySummary {
                key: key.to_string(),
                resource_id: resource.id(),
                kind: resource.kind(),
                age_secs: resource.created_at().elapsed().as_secs(),
                open_connections: resource.pool().size(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    /// Get the number of cached pools.
    pub fn len(&self) -> usize {
        self.pools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &CacheKey) -> Option<Arc<PooledResource>> {
        self.pools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl Default for PoolCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PoolCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolCache")
            .field("entries", &self.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
