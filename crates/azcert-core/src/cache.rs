//! In-memory request cache with a fixed time-to-live.
//!
//! Values are stored serialized as JSON, so one cache instance can hold
//! results of different read operations side by side. Expiry is lazy: an
//! entry older than the TTL is evicted by the lookup that finds it. There is
//! no capacity bound and no background sweep.
//!
//! A cache is an explicit object owned by one [`ServiceClient`](crate::ServiceClient).
//! Build one per browser session or per server request, never one per process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::clock::{Clock, SystemClock};
use crate::config::CACHE_TTL;

/// One stored value and the time it was stored.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: DateTime<Utc>,
}

/// Which entries an [`RequestCache::invalidate`] call removes.
#[derive(Debug, Clone, Copy)]
pub enum Invalidate<'a> {
    /// Every entry.
    All,
    /// Exactly the entry with this key.
    Key(&'a str),
    /// Every entry whose key matches the pattern.
    Matching(&'a Regex),
}

impl<'a> From<&'a str> for Invalidate<'a> {
    fn from(key: &'a str) -> Self {
        Self::Key(key)
    }
}

impl<'a> From<&'a Regex> for Invalidate<'a> {
    fn from(pattern: &'a Regex) -> Self {
        Self::Matching(pattern)
    }
}

impl<'a> From<Option<&'a str>> for Invalidate<'a> {
    fn from(key: Option<&'a str>) -> Self {
        key.map_or(Self::All, Self::Key)
    }
}

/// Key/value store with TTL-based expiry and pattern invalidation.
pub struct RequestCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl RequestCache {
    /// Create a cache with the default TTL and the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a cache with the default TTL reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, CACHE_TTL)
    }

    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: std::time::Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::milliseconds(ttl.as_millis() as i64),
            clock,
        }
    }

    // The map is never held across an await point, so a poisoned lock only
    // means a panic elsewhere; the data itself is still consistent.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store `data` under `key`, replacing any prior entry, and hand it back.
    ///
    /// Values that cannot be represented as JSON are passed through without
    /// being stored.
    pub fn set<T: Serialize>(&self, key: &str, data: T) -> T {
        match serde_json::to_value(&data) {
            Ok(value) => {
                let entry = CacheEntry {
                    value,
                    stored_at: self.clock.now(),
                };
                self.entries().insert(key.to_string(), entry);
                tracing::trace!(key, "cache set");
            }
            Err(err) => tracing::debug!(key, %err, "value not cacheable"),
        }
        data
    }

    /// Get the value under `key` if it is present and not older than the TTL.
    ///
    /// An expired entry is evicted by this call.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let mut entries = self.entries();
        let expired = now - entries.get(key)?.stored_at > self.ttl;

        if expired {
            entries.remove(key);
            tracing::trace!(key, "cache entry expired");
            return None;
        }

        let value = entries.get(key)?.value.clone();
        serde_json::from_value(value).ok()
    }

    /// Remove entries: all of them, one key, or every key matching a pattern.
    pub fn invalidate<'a>(&self, target: impl Into<Invalidate<'a>>) {
        let mut entries = self.entries();
        match target.into() {
            Invalidate::All => entries.clear(),
            Invalidate::Key(key) => {
                entries.remove(key);
            }
            Invalidate::Matching(pattern) => entries.retain(|key, _| !pattern.is_match(key)),
        }
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.invalidate(Invalidate::All);
    }

    /// Number of stored entries, expired ones included until they are looked up.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RequestCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCache")
            .field("entries", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
