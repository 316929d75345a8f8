//! sketch-cache - Cache services for Sketch Drawer
//!
//! The drawer only talks to caches through [`CacheStore`]: used size, maximum
//! size, clear, and the disabled flag. This crate provides the three stores
//! the demo runs with:
//! - [`LruMemoryCache`] - decoded images held in memory
//! - [`LruBitmapPool`] - pixel buffers kept around for reuse
//! - [`LruDiskCache`] - downloaded files, one file per entry
//!
//! [`CacheServices`] bundles them for the app layer.

pub mod bitmap_pool;
pub mod disk;
pub mod memory;
pub mod services;
pub mod store;

pub use bitmap_pool::{Bitmap, LruBitmapPool};
pub use disk::LruDiskCache;
pub use memory::LruMemoryCache;
pub use services::{
    CacheServices, DEFAULT_BITMAP_POOL_MAX_SIZE, DEFAULT_DISK_CACHE_MAX_SIZE,
    DEFAULT_MEMORY_CACHE_MAX_SIZE,
};
pub use store::{CacheKind, CacheStats, CacheStore};
