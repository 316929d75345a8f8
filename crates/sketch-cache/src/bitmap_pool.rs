//! Reuse pool for pixel buffers

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use sketch_core::logging::targets;
use sketch_core::Result;

use crate::store::{CacheKind, CacheStore};

/// Bytes per pixel (RGBA8888)
const BYTES_PER_PIXEL: u64 = 4;

/// A decoded RGBA pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// A zeroed bitmap of the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let len = u64::from(width) * u64::from(height) * BYTES_PER_PIXEL;
        Self {
            width,
            height,
            pixels: vec![0; len as usize],
        }
    }

    pub fn byte_count(&self) -> u64 {
        self.pixels.len() as u64
    }
}

/// Holds released bitmaps so a later decode of the same dimensions can reuse
/// the allocation. The oldest buffers are dropped once `max_size` is exceeded.
pub struct LruBitmapPool {
    max_size: u64,
    disabled: AtomicBool,
    pool: Mutex<PoolEntries>,
}

#[derive(Default)]
struct PoolEntries {
    bitmaps: VecDeque<Bitmap>,
    size: u64,
}

impl LruBitmapPool {
    pub fn new(max_size: u64) -> Self {
        Self {
            max_size,
            disabled: AtomicBool::new(false),
            pool: Mutex::new(PoolEntries::default()),
        }
    }

    fn pool(&self) -> MutexGuard<'_, PoolEntries> {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand a bitmap back for reuse. Returns `false` if the pool would not
    /// keep it.
    pub fn put(&self, bitmap: Bitmap) -> bool {
        if self.is_disabled() || bitmap.byte_count() > self.max_size {
            return false;
        }

        let mut pool = self.pool();
        pool.size += bitmap.byte_count();
        pool.bitmaps.push_back(bitmap);
        while pool.size > self.max_size {
            match pool.bitmaps.pop_front() {
                Some(evicted) => {
                    pool.size -= evicted.byte_count();
                    tracing::trace!(
                        target: targets::CACHE,
                        "bitmap pool evicted {}x{}",
                        evicted.width,
                        evicted.height
                    );
                }
                None => break,
            }
        }
        true
    }

    /// Take a pooled bitmap with exactly these dimensions, if any.
    pub fn get(&self, width: u32, height: u32) -> Option<Bitmap> {
        if self.is_disabled() {
            return None;
        }
        let mut pool = self.pool();
        let pos = pool
            .bitmaps
            .iter()
            .rposition(|b| b.width == width && b.height == height)?;
        let bitmap = pool.bitmaps.remove(pos)?;
        pool.size -= bitmap.byte_count();
        Some(bitmap)
    }

    /// Reuse a pooled bitmap or allocate a fresh one
    pub fn get_or_create(&self, width: u32, height: u32) -> Bitmap {
        match self.get(width, height) {
            Some(mut bitmap) => {
                bitmap.pixels.fill(0);
                bitmap
            }
            None => Bitmap::new(width, height),
        }
    }

    pub fn len(&self) -> usize {
        self.pool().bitmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for LruBitmapPool {
    fn kind(&self) -> CacheKind {
        CacheKind::BitmapPool
    }

    fn size(&self) -> u64 {
        self.pool().size
    }

    fn max_size(&self) -> u64 {
        self.max_size
    }

    fn clear(&self) -> Result<()> {
        let mut pool = self.pool();
        let count = pool.bitmaps.len();
        *pool = PoolEntries::default();
        tracing::info!(target: targets::CACHE, "bitmap pool cleared, dropped {} bitmaps", count);
        Ok(())
    }

    fn set_disabled(&self, disabled: bool) {
        if self.disabled.swap(disabled, Ordering::SeqCst) != disabled {
            tracing::info!(
                target: targets::CACHE,
                "bitmap pool {}",
                if disabled { "disabled" } else { "enabled" }
            );
        }
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}
