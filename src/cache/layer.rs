//! Cache layer that orchestrates caching logic with network fetching.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use super::storage::{CacheStorage, MemoryStorage, NoopStorage};
use super::traits::CacheResult;

/// Cache layer that manages caching logic and network fetching.
///
/// This layer sits between the application and the network client. Clones
/// share the same storage, so every clone observes the same entries.
pub struct CacheLayer<K, V> {
  storage: Arc<dyn CacheStorage<K, V>>,
}

impl<K, V> CacheLayer<K, V>
where
  K: Eq + Hash + Send + 'static,
  V: Clone + Send + 'static,
{
  /// Create a new cache layer with the given storage backend.
  pub fn new(storage: impl CacheStorage<K, V> + 'static) -> Self {
    Self {
      storage: Arc::new(storage),
    }
  }

  /// In-memory cache.
  pub fn memory() -> Self {
    Self::new(MemoryStorage::new())
  }

  /// Cache that never holds anything; every fetch goes to the network.
  pub fn disabled() -> Self {
    Self::new(NoopStorage)
  }

  /// Fetch with cache-first strategy.
  ///
  /// 1. Check cache - if present, return it without calling `fetcher`
  /// 2. Otherwise await `fetcher`
  /// 3. On success store the value under `key`; on failure store nothing
  pub async fn fetch<F, Fut, E>(&self, key: K, fetcher: F) -> Result<CacheResult<V>, E>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
  {
    if let Some(cached) = self.storage.get(&key) {
      return Ok(CacheResult::from_cache(cached.value, cached.cached_at));
    }

    self.refresh(key, fetcher).await
  }

  /// Fetch from the network unconditionally, replacing the entry on success.
  ///
  /// A failed fetch leaves any existing entry in place.
  pub async fn refresh<F, Fut, E>(&self, key: K, fetcher: F) -> Result<CacheResult<V>, E>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
  {
    let data = fetcher().await?;
    self.storage.insert(key, data.clone());
    Ok(CacheResult::from_network(data))
  }

  /// Drop the entry for `key`. Returns whether one existed.
  pub fn invalidate(&self, key: &K) -> bool {
    self.storage.remove(key)
  }

  pub fn clear(&self) {
    self.storage.clear();
  }

  pub fn contains(&self, key: &K) -> bool {
    self.storage.get(key).is_some()
  }

  pub fn len(&self) -> usize {
    self.storage.len()
  }

  pub fn is_empty(&self) -> bool {
    self.storage.is_empty()
  }
}

impl<K, V> Clone for CacheLayer<K, V> {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
    }
  }
}
