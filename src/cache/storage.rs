//! Cache storage trait and in-memory implementation.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A single cached value.
#[derive(Debug, Clone)]
pub struct CachedEntry<V> {
  pub value: V,
  /// When the value was stored
  pub cached_at: DateTime<Utc>,
}

/// Trait for cache storage backends.
///
/// Every mutation touches exactly one key, or all keys for `clear`.
pub trait CacheStorage<K, V>: Send + Sync {
  fn get(&self, key: &K) -> Option<CachedEntry<V>>;

  /// Store a value, replacing any previous entry for the key.
  fn insert(&self, key: K, value: V);

  /// Remove the entry for a key. Returns whether one existed.
  fn remove(&self, key: &K) -> bool;

  fn clear(&self);

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Storage implementation that doesn't cache anything.
/// Used when caching is disabled - all operations are no-ops.
pub struct NoopStorage;

impl<K, V> CacheStorage<K, V> for NoopStorage {
  fn get(&self, _key: &K) -> Option<CachedEntry<V>> {
    None // Always miss
  }

  fn insert(&self, _key: K, _value: V) {
    // Discard
  }

  fn remove(&self, _key: &K) -> bool {
    false
  }

  fn clear(&self) {}

  fn len(&self) -> usize {
    0
  }
}

/// Unbounded in-memory storage, one entry per key.
pub struct MemoryStorage<K, V> {
  entries: Mutex<HashMap<K, CachedEntry<V>>>,
}

impl<K, V> MemoryStorage<K, V> {
  pub fn new() -> Self {
    Self {
      entries: Mutex::new(HashMap::new()),
    }
  }

  /// Lock the table, recovering from poisoning. Every mutation is a single
  /// map operation, so the table is never left half-updated.
  fn entries(&self) -> MutexGuard<'_, HashMap<K, CachedEntry<V>>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<K, V> Default for MemoryStorage<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V> CacheStorage<K, V> for MemoryStorage<K, V>
where
  K: Eq + Hash + Send,
  V: Clone + Send,
{
  fn get(&self, key: &K) -> Option<CachedEntry<V>> {
    self.entries().get(key).cloned()
  }

  fn insert(&self, key: K, value: V) {
    let entry = CachedEntry {
      value,
      cached_at: Utc::now(),
    };
    self.entries().insert(key, entry);
  }

  fn remove(&self, key: &K) -> bool {
    self.entries().remove(key).is_some()
  }

  fn clear(&self) {
    self.entries().clear();
  }

  fn len(&self) -> usize {
    self.entries().len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_insert_overwrites_single_entry() {
    let storage = MemoryStorage::new();
    storage.insert(42u64, "first");
    storage.insert(42u64, "second");
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.get(&42).map(|e| e.value), Some("second"));
  }

  #[test]
  fn test_remove_only_touches_one_key() {
    let storage = MemoryStorage::new();
    storage.insert(1u64, "a");
    storage.insert(2u64, "b");
    assert!(storage.remove(&1));
    assert!(!storage.remove(&1));
    assert!(storage.get(&1).is_none());
    assert_eq!(storage.get(&2).map(|e| e.value), Some("b"));
  }

  #[test]
  fn test_noop_storage_always_misses() {
    let storage = NoopStorage;
    CacheStorage::<u64, &str>::insert(&storage, 1, "a");
    assert!(CacheStorage::<u64, &str>::get(&storage, &1).is_none());
    assert!(CacheStorage::<u64, &str>::is_empty(&storage));
  }

  #[test]
  fn test_concurrent_distinct_keys() {
    let storage = std::sync::Arc::new(MemoryStorage::new());
    let handles: Vec<_> = (0..8u64)
      .map(|k| {
        let storage = storage.clone();
        std::thread::spawn(move || {
          for i in 0..100u64 {
            storage.insert(k, i);
            if i % 3 == 0 {
              storage.remove(&k);
            }
          }
        })
      })
      .collect();
    for h in handles {
      h.join().unwrap();
    }
    // i = 99 is a multiple of 3, so every key ended removed
    assert!(storage.is_empty());
  }
}
