//! The bundle of caches shared across the app

use std::path::Path;
use std::sync::Arc;

use sketch_core::logging::targets;
use sketch_core::Result;

use crate::bitmap_pool::{Bitmap, LruBitmapPool};
use crate::disk::LruDiskCache;
use crate::memory::LruMemoryCache;
use crate::store::{CacheKind, CacheStats, CacheStore};

pub const DEFAULT_MEMORY_CACHE_MAX_SIZE: u64 = 64_000_000;
pub const DEFAULT_BITMAP_POOL_MAX_SIZE: u64 = 32_000_000;
pub const DEFAULT_DISK_CACHE_MAX_SIZE: u64 = 100_000_000;

/// Cloneable handle to the memory cache, bitmap pool and disk cache.
#[derive(Clone)]
pub struct CacheServices {
    pub memory: Arc<dyn CacheStore>,
    pub bitmap_pool: Arc<dyn CacheStore>,
    pub disk: Arc<dyn CacheStore>,
}

impl CacheServices {
    pub fn new(
        memory: Arc<dyn CacheStore>,
        bitmap_pool: Arc<dyn CacheStore>,
        disk: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            memory,
            bitmap_pool,
            disk,
        }
    }

    /// Build the default stores, with the disk cache under `<cache_dir>/disk`.
    ///
    /// With `seed_demo_data` each store is pre-filled with a few entries so
    /// the size readouts and clear actions have something to show.
    pub fn open(cache_dir: &Path, seed_demo_data: bool) -> Result<Self> {
        let memory = Arc::new(LruMemoryCache::new(DEFAULT_MEMORY_CACHE_MAX_SIZE));
        let bitmap_pool = Arc::new(LruBitmapPool::new(DEFAULT_BITMAP_POOL_MAX_SIZE));
        let disk = Arc::new(LruDiskCache::open(
            cache_dir.join("disk"),
            DEFAULT_DISK_CACHE_MAX_SIZE,
        )?);

        if seed_demo_data {
            seed(&memory, &bitmap_pool, &disk)?;
        }

        Ok(Self::new(memory, bitmap_pool, disk))
    }

    pub fn get(&self, kind: CacheKind) -> &Arc<dyn CacheStore> {
        match kind {
            CacheKind::Memory => &self.memory,
            CacheKind::BitmapPool => &self.bitmap_pool,
            CacheKind::Disk => &self.disk,
        }
    }

    /// Current stats of every cache, in [`CacheKind::ALL`] order
    pub fn snapshot(&self) -> Vec<CacheStats> {
        CacheKind::ALL
            .iter()
            .map(|&kind| CacheStats::of(self.get(kind).as_ref()))
            .collect()
    }
}

fn seed(memory: &LruMemoryCache, bitmap_pool: &LruBitmapPool, disk: &LruDiskCache) -> Result<()> {
    for i in 0..4u32 {
        let key = format!("demo://image/{i}");
        let blob: Arc<[u8]> = vec![0u8; 750_000 * (i as usize + 1)].into();
        memory.put(key.clone(), blob);
        bitmap_pool.put(Bitmap::new(480 + 120 * i, 320 + 80 * i));
        disk.put(&key, &vec![0u8; 1_200_000 * (i as usize + 1)])?;
    }
    tracing::info!(target: targets::CACHE, "seeded caches with demo data");
    Ok(())
}
