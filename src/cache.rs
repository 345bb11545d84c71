//! Result cache in front of a template source
//!
//! Every resolved `TemplateInfo` is remembered, "not found" included, so a
//! template referenced on every page costs one store round-trip in total.
//! Errors are never stored.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use crate::Result;
use crate::info::TemplateInfo;
use crate::resource::TemplateSource;

/// Key/value storage for resolved templates
pub trait CacheBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<TemplateInfo>;
    fn set(&self, key: &str, info: TemplateInfo);
}

impl<C: CacheBackend + ?Sized> CacheBackend for Arc<C> {
    fn get(&self, key: &str) -> Option<TemplateInfo> {
        (**self).get(key)
    }

    fn set(&self, key: &str, info: TemplateInfo) {
        (**self).set(key, info)
    }
}

/// Cache key for an identifier: blake3 hex digest plus the identifier's byte
/// length. Keeps keys bounded and free of control characters.
pub fn cache_key(identifier: &str) -> String {
    format!("{}_{}", blake3::hash(identifier.as_bytes()).to_hex(), identifier.len())
}

#[derive(Debug, Clone)]
struct Entry {
    info: TemplateInfo,
    stored_at: Instant,
}

/// In-process cache backend with an optional time-to-live
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Option<Duration>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries older than `ttl` are treated as missing
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::default(),
            ttl: Some(ttl),
        }
    }

    pub fn invalidate(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_fresh(&self, entry: &Entry) -> bool {
        self.ttl.map_or(true, |ttl| entry.stored_at.elapsed() < ttl)
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, key: &str) -> Option<TemplateInfo> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.info.clone())
    }

    fn set(&self, key: &str, info: TemplateInfo) {
        let entry = Entry {
            info,
            stored_at: Instant::now(),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }
}

/// Memoizing wrapper around any `TemplateSource`
pub struct CachedResource<R, C = MemoryCache> {
    inner: R,
    backend: C,
    namespace: Option<String>,
}

impl<R: TemplateSource, C: CacheBackend> CachedResource<R, C> {
    pub fn new(inner: R, backend: C) -> Self {
        Self {
            inner,
            backend,
            namespace: None,
        }
    }

    /// Prefix keys so several resources can share one backend
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn backend(&self) -> &C {
        &self.backend
    }

    /// Key under which `identifier` is stored in the backend
    pub fn key_for(&self, identifier: &str) -> String {
        let key = cache_key(identifier);
        match &self.namespace {
            Some(ns) => format!("{}:{}", ns, key),
            None => key,
        }
    }
}

impl<R: TemplateSource, C: CacheBackend> TemplateSource for CachedResource<R, C> {
    fn resolve(&self, identifier: &str) -> Result<TemplateInfo> {
        let key = self.key_for(identifier);
        if let Some(info) = self.backend.get(&key) {
            tracing::debug!(identifier, "template cache hit");
            return Ok(info);
        }

        tracing::debug!(identifier, "template cache miss");
        let info = self.inner.resolve(identifier)?;
        self.backend.set(&key, info.clone());
        Ok(info)
    }
}
