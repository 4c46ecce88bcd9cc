//! Data models for the pool cache.
//!
//! This module re-exports all model types used throughout the crate.

pub mod connection;
pub mod query;

// Re-export commonly used types
pub use connection::{ConnectionParameters, DatabaseKind, RawConnectionParameters};
pub use query::{CacheEntrySummary, DATE_FORMAT, ResultRow, TIME_FORMAT, TIMESTAMP_FORMAT};
