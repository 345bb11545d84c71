//! # tplresource - database-backed template resolution
//!
//! Resolves a template identifier into `(source, mtime)` for a host template
//! engine, reading a relational store with a filesystem fallback.
//!
//! tplresource provides:
//! - Dialect-aware ranked queries that prefer the requested template set over the default set
//! - Inline overrides stored in the database, file-backed templates for the default set
//! - Traversal-safe path resolution under a configured base directory
//! - An optional result cache that also remembers "not found"

pub mod row;
pub mod info;
pub mod query;
pub mod storage;
pub mod path;
pub mod resource;
pub mod cache;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use row::{TemplateRow, Value};
pub use info::TemplateInfo;
pub use query::{Dialect, RowFetcher};
pub use storage::{SqliteStore, TemplateStore};
pub use path::{PathResolver, TemplatePathResolver};
pub use resource::{DatabaseResource, RowKind, TemplateSource, RESOURCE_SCHEME};
pub use cache::{CacheBackend, CachedResource, MemoryCache};
pub use config::ResourceConfig;

/// Result type alias for tplresource operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for tplresource operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
