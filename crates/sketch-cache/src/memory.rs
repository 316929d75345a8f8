//! In-memory LRU cache of decoded images

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sketch_core::logging::targets;
use sketch_core::Result;

use crate::store::{CacheKind, CacheStore};

/// Byte blobs keyed by request key, evicting the least recently used entry
/// whenever the total would exceed `max_size`.
pub struct LruMemoryCache {
    max_size: u64,
    disabled: AtomicBool,
    entries: Mutex<LruEntries>,
}

#[derive(Default)]
struct LruEntries {
    map: HashMap<String, Arc<[u8]>>,
    /// Front = least recently used
    order: VecDeque<String>,
    size: u64,
}

impl LruEntries {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    fn remove(&mut self, key: &str) -> Option<Arc<[u8]>> {
        let value = self.map.remove(key)?;
        self.order.retain(|k| k != key);
        self.size -= value.len() as u64;
        Some(value)
    }

    fn trim_to(&mut self, max_size: u64) {
        while self.size > max_size {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if let Some(value) = self.map.remove(&oldest) {
                self.size -= value.len() as u64;
                tracing::trace!(target: targets::CACHE, "memory cache evicted {}", oldest);
            }
        }
    }
}

impl LruMemoryCache {
    pub fn new(max_size: u64) -> Self {
        Self {
            max_size,
            disabled: AtomicBool::new(false),
            entries: Mutex::new(LruEntries::default()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, LruEntries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `value` under `key`. Entries larger than the whole cache are
    /// rejected.
    pub fn put(&self, key: impl Into<String>, value: Arc<[u8]>) -> bool {
        let key = key.into();
        if self.is_disabled() {
            tracing::debug!(target: targets::CACHE, "memory cache disabled, skipping put {}", key);
            return false;
        }
        if value.len() as u64 > self.max_size {
            tracing::debug!(
                target: targets::CACHE,
                "memory cache entry {} too large ({} bytes)",
                key,
                value.len()
            );
            return false;
        }

        let mut entries = self.entries();
        entries.remove(&key);
        entries.size += value.len() as u64;
        entries.order.push_back(key.clone());
        entries.map.insert(key, value);
        entries.trim_to(self.max_size);
        true
    }

    pub fn get(&self, key: &str) -> Option<Arc<[u8]>> {
        if self.is_disabled() {
            return None;
        }
        let mut entries = self.entries();
        let value = entries.map.get(key).cloned()?;
        entries.touch(key);
        Some(value)
    }

    pub fn remove(&self, key: &str) -> Option<Arc<[u8]>> {
        self.entries().remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for LruMemoryCache {
    fn kind(&self) -> CacheKind {
        CacheKind::Memory
    }

    fn size(&self) -> u64 {
        self.entries().size
    }

    fn max_size(&self) -> u64 {
        self.max_size
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries();
        let released = entries.size;
        *entries = LruEntries::default();
        tracing::info!(target: targets::CACHE, "memory cache cleared, released {} bytes", released);
        Ok(())
    }

    fn set_disabled(&self, disabled: bool) {
        if self.disabled.swap(disabled, Ordering::SeqCst) != disabled {
            tracing::info!(
                target: targets::CACHE,
                "memory cache {}",
                if disabled { "disabled" } else { "enabled" }
            );
        }
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(len: usize) -> Arc<[u8]> {
        vec![0u8; len].into()
    }

    #[test]
    fn test_put_and_get() {
        let cache = LruMemoryCache::new(100);
        assert!(cache.put("a", blob(10)));
        assert_eq!(cache.get("a").map(|v| v.len()), Some(10));
        assert_eq!(cache.size(), 10);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = LruMemoryCache::new(30);
        cache.put("a", blob(10));
        cache.put("b", blob(10));
        cache.put("c", blob(10));

        // Touch "a" so "b" becomes the oldest
        assert!(cache.get("a").is_some());
        cache.put("d", blob(10));

        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert_eq!(cache.size(), 30);
    }

    #[test]
    fn test_replacing_key_updates_size() {
        let cache = LruMemoryCache::new(100);
        cache.put("a", blob(10));
        cache.put("a", blob(25));
        assert_eq!(cache.size(), 25);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_rejects_oversized_entry() {
        let cache = LruMemoryCache::new(8);
        assert!(!cache.put("big", blob(9)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_releases_everything() {
        let cache = LruMemoryCache::new(100);
        cache.put("a", blob(10));
        cache.put("b", blob(20));

        cache.clear().unwrap();

        assert_eq!(cache.size(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.max_size(), 100);
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let cache = LruMemoryCache::new(100);
        cache.put("a", blob(10));
        cache.set_disabled(true);

        assert!(!cache.put("b", blob(10)));
        assert!(cache.get("a").is_none());

        cache.set_disabled(false);
        assert!(cache.get("a").is_some());
    }
}
