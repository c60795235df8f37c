//! In-process read cache for list queries.
//!
//! This module provides a small, domain-agnostic caching mechanism that:
//! - Memoizes one value per key (insertion overwrites)
//! - Serves hits without calling the fetcher
//! - Only stores values from successful fetches
//! - Relies on explicit invalidation; there is no time-based expiry

mod layer;
mod storage;
mod traits;

pub use layer::CacheLayer;
pub use storage::{CacheStorage, CachedEntry, MemoryStorage, NoopStorage};
pub use traits::{CacheResult, CacheSource};
