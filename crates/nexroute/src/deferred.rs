//! Memoized deferred units and their cache
//!
//! A [`Deferred`] wraps a [`Loader`] and runs it at most once: every caller of
//! [`Deferred::load`], concurrent or later, observes the same outcome. The
//! [`DeferredCache`] keeps one unit per cache key so that regenerating the route list
//! hands the host the very same unit instead of a fresh one.

use crate::element::{Component, Loader};
use crate::error::LoadError;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Cache key prefix for page units
pub const PAGE_KEY_PREFIX: &str = "page:";

/// Cache key prefix for not-found units
pub const NOT_FOUND_KEY_PREFIX: &str = "notfound:";

/// A load that runs once and is shared by every clone
#[derive(Clone)]
pub struct Deferred {
    inner: Arc<DeferredInner>,
}

struct DeferredInner {
    key: String,
    loader: Loader,
    outcome: OnceCell<Result<Component, LoadError>>,
}

impl Deferred {
    pub fn new(key: impl Into<String>, loader: Loader) -> Self {
        Self {
            inner: Arc::new(DeferredInner {
                key: key.into(),
                loader,
                outcome: OnceCell::new(),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Whether the loader has already settled
    pub fn is_settled(&self) -> bool {
        self.inner.outcome.initialized()
    }

    /// Run the loader (first call only) and return its default export
    ///
    /// Failures are memoized like successes; there is no retry.
    pub async fn load(&self) -> Result<Component, LoadError> {
        self.inner
            .outcome
            .get_or_init(|| async {
                debug!(key = %self.inner.key, "loading deferred unit");
                (self.inner.loader)()
                    .await
                    .map(|module| module.default)
                    .map_err(|err| err.with_key(self.inner.key.clone()))
            })
            .await
            .clone()
    }

    /// Whether both handles share one underlying unit
    pub fn ptr_eq(a: &Deferred, b: &Deferred) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("key", &self.inner.key)
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Statistics for the deferred cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served by an existing unit
    pub hits: u64,

    /// Lookups that created a unit
    pub misses: u64,

    /// Units currently held
    pub entries: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Default)]
struct CacheState {
    units: HashMap<String, Deferred>,
    hits: u64,
    misses: u64,
}

/// Deferred units keyed by cache key
///
/// Entries live until they are invalidated or the cache is cleared. A key that is
/// reused with a different loader still returns the original unit.
#[derive(Default)]
pub struct DeferredCache {
    state: Mutex<CacheState>,
}

impl DeferredCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the unit stored under `key`, creating it from `loader` on a miss
    pub fn get_or_insert(&self, key: &str, loader: &Loader) -> Deferred {
        let mut state = self.state();

        if let Some(unit) = state.units.get(key).cloned() {
            state.hits += 1;
            debug!(key, "deferred cache hit");
            return unit;
        }

        state.misses += 1;
        debug!(key, "deferred cache miss");
        let unit = Deferred::new(key, Arc::clone(loader));
        state.units.insert(key.to_string(), unit.clone());
        unit
    }

    /// Look up a unit without creating one
    pub fn get(&self, key: &str) -> Option<Deferred> {
        self.state().units.get(key).cloned()
    }

    /// Drop one unit; returns whether it existed
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.state().units.remove(key).is_some();
        if removed {
            info!(key, "invalidated deferred unit");
        }
        removed
    }

    /// Drop every unit whose key starts with `prefix`
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut state = self.state();
        let before = state.units.len();
        state.units.retain(|key, _| !key.starts_with(prefix));
        let removed = before - state.units.len();
        if removed > 0 {
            info!(prefix, removed, "invalidated deferred units");
        }
        removed
    }

    /// Drop every unit and reset statistics
    pub fn clear(&self) {
        let mut state = self.state();
        let removed = state.units.len();
        *state = CacheState::default();
        info!(removed, "cleared deferred cache");
    }

    /// Cached keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.state().units.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.state().units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.units.len(),
        }
    }
}

impl fmt::Debug for DeferredCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredCache")
            .field("keys", &self.keys())
            .finish()
    }
}
