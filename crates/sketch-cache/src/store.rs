//! The cache contract consumed by the drawer

use std::fmt;

use serde::{Deserialize, Serialize};
use sketch_core::{format_file_size, Result};

/// Which cache a store, stat or event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKind {
    Memory,
    BitmapPool,
    Disk,
}

impl CacheKind {
    pub const ALL: [CacheKind; 3] = [CacheKind::Memory, CacheKind::BitmapPool, CacheKind::Disk];

    pub fn label(&self) -> &'static str {
        match self {
            CacheKind::Memory => "Memory",
            CacheKind::BitmapPool => "BitmapPool",
            CacheKind::Disk => "Disk",
        }
    }

    /// Whether clearing this cache touches the filesystem
    pub fn clears_in_background(&self) -> bool {
        matches!(self, CacheKind::Disk)
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A cache as seen from the menu: sizes, clear, and an on/off switch.
pub trait CacheStore: Send + Sync {
    fn kind(&self) -> CacheKind;

    /// Bytes currently held
    fn size(&self) -> u64;

    /// Capacity in bytes
    fn max_size(&self) -> u64;

    /// Drop every entry
    fn clear(&self) -> Result<()>;

    /// While disabled, the cache neither stores nor returns entries
    fn set_disabled(&self, disabled: bool);

    fn is_disabled(&self) -> bool;
}

/// Point-in-time sizes of one cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub kind: CacheKind,
    pub size: u64,
    pub max_size: u64,
    pub disabled: bool,
}

impl CacheStats {
    pub fn of(store: &dyn CacheStore) -> Self {
        Self {
            kind: store.kind(),
            size: store.size(),
            max_size: store.max_size(),
            disabled: store.is_disabled(),
        }
    }

    /// `"<used>/<max>"`, e.g. `"1.50 MB/64.00 MB"`
    pub fn display(&self) -> String {
        format!(
            "{}/{}",
            format_file_size(self.size),
            format_file_size(self.max_size)
        )
    }
}
