//! Reference cache implementation.

use derive_getters::Getters;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cached value with its insertion time.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Time since the entry was added.
    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }
}

/// Keyed store that remembers insertion order and never overwrites.
///
/// # Example
///
/// ```
/// use mediaref_cache::ReferenceCache;
///
/// let mut cache = ReferenceCache::new("assets");
/// assert!(cache.add("ref:B", 2));
/// assert!(cache.add("ref:A", 1));
/// assert!(!cache.add("ref:B", 3));
///
/// assert_eq!(cache.get("ref:B"), Some(&2));
/// assert_eq!(cache.values().copied().collect::<Vec<_>>(), vec![2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceCache<T> {
    name: &'static str,
    entries: HashMap<String, CacheEntry<T>>,
    order: Vec<String>,
}

impl<T> ReferenceCache<T> {
    /// Create an empty cache; `name` only shows up in logs.
    pub fn new(name: &'static str) -> Self {
        tracing::debug!(cache = name, "Creating new ReferenceCache");
        Self {
            name,
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Store `value` under `key` unless the key is taken.
    ///
    /// Returns `true` if the value was stored.
    pub fn add(&mut self, key: impl Into<String>, value: T) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            tracing::debug!(cache = self.name, key = %key, "Key already cached, keeping first value");
            return false;
        }

        self.entries.insert(
            key.clone(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
        self.order.push(key);
        tracing::debug!(cache = self.name, size = self.order.len(), "Inserted entry into cache");
        true
    }

    /// Cached value for `key`.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Cached entry for `key`, with its insertion time.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// Whether `key` is cached.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, value)| value)
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|entry| (key.as_str(), &entry.value)))
    }

    /// Clear all cache entries.
    pub fn clear(&mut self) {
        let count = self.order.len();
        self.entries.clear();
        self.order.clear();
        tracing::info!(cache = self.name, cleared = count, "Cleared cache");
    }
}

impl<T> Default for ReferenceCache<T> {
    fn default() -> Self {
        Self::new("references")
    }
}
