//! Disk cache: one file per entry in a flat directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use sketch_core::logging::targets;
use sketch_core::{Error, Result};

use crate::store::{CacheKind, CacheStore};

/// Extension of entry files; anything else in the directory is left alone
const ENTRY_EXTENSION: &str = "cache";

/// Least-recently-used disk cache. Entry file names are a stable hash of the
/// key. Reads refresh the file's modification time, and the oldest files are
/// removed once the directory holds more than `max_size` bytes.
pub struct LruDiskCache {
    dir: PathBuf,
    max_size: u64,
    disabled: AtomicBool,
    /// Serializes writers against trim/clear
    io_lock: Mutex<()>,
}

struct EntryFile {
    path: PathBuf,
    len: u64,
    modified: SystemTime,
}

impl LruDiskCache {
    /// Open (creating if needed) a cache rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>, max_size: u64) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::cache(
                CacheKind::Disk.label(),
                format!("cannot create {}: {}", dir.display(), e),
            )
        })?;
        tracing::debug!(target: targets::CACHE, "disk cache opened at {}", dir.display());

        Ok(Self {
            dir,
            max_size,
            disabled: AtomicBool::new(false),
            io_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.io_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{:016x}.{}", fnv1a_64(key.as_bytes()), ENTRY_EXTENSION))
    }

    /// Write `data` under `key`, then trim. Does nothing while disabled.
    pub fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        if self.is_disabled() {
            tracing::debug!(target: targets::CACHE, "disk cache disabled, skipping put {}", key);
            return Ok(());
        }

        let _guard = self.lock();
        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, data)?;
        fs::rename(&temp_path, &path)?;
        tracing::trace!(
            target: targets::CACHE,
            "disk cache stored {} ({} bytes)",
            key,
            data.len()
        );

        self.trim_locked()
    }

    /// Read the entry for `key`, refreshing its position in the LRU order.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.is_disabled() {
            return Ok(None);
        }

        let path = self.entry_path(key);
        match fs::read(&path) {
            Ok(data) => {
                if let Ok(file) = fs::File::options().write(true).open(&path) {
                    let _ = file.set_modified(SystemTime::now());
                }
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entry_path(key).is_file()
    }

    fn entries(&self) -> Result<Vec<EntryFile>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            let metadata = dir_entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            entries.push(EntryFile {
                path,
                len: metadata.len(),
                modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            });
        }
        Ok(entries)
    }

    fn trim_locked(&self) -> Result<()> {
        let mut entries = self.entries()?;
        let mut total: u64 = entries.iter().map(|e| e.len).sum();
        if total <= self.max_size {
            return Ok(());
        }

        entries.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));
        for entry in entries {
            if total <= self.max_size {
                break;
            }
            fs::remove_file(&entry.path)?;
            total -= entry.len;
            tracing::trace!(
                target: targets::CACHE,
                "disk cache evicted {}",
                entry.path.display()
            );
        }
        Ok(())
    }
}

impl CacheStore for LruDiskCache {
    fn kind(&self) -> CacheKind {
        CacheKind::Disk
    }

    fn size(&self) -> u64 {
        match self.entries() {
            Ok(entries) => entries.iter().map(|e| e.len).sum(),
            Err(e) => {
                tracing::warn!(target: targets::CACHE, "disk cache size unavailable: {}", e);
                0
            }
        }
    }

    fn max_size(&self) -> u64 {
        self.max_size
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock();
        let entries = self.entries()?;
        let count = entries.len();
        for entry in entries {
            fs::remove_file(&entry.path).map_err(|e| {
                Error::cache(
                    CacheKind::Disk.label(),
                    format!("cannot remove {}: {}", entry.path.display(), e),
                )
            })?;
        }
        tracing::info!(target: targets::CACHE, "disk cache cleared, removed {} files", count);
        Ok(())
    }

    fn set_disabled(&self, disabled: bool) {
        if self.disabled.swap(disabled, Ordering::SeqCst) != disabled {
            tracing::info!(
                target: targets::CACHE,
                "disk cache {}",
                if disabled { "disabled" } else { "enabled" }
            );
        }
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}

/// FNV-1a, 64 bit. Stable across runs and platforms, unlike `DefaultHasher`.
fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(max_size: u64) -> (TempDir, LruDiskCache) {
        let temp = TempDir::new().unwrap();
        let cache = LruDiskCache::open(temp.path().join("disk"), max_size).unwrap();
        (temp, cache)
    }

    #[test]
    fn test_fnv1a_known_values() {
        assert_eq!(fnv1a_64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_put_then_get() {
        let (_temp, cache) = open(1_000);
        cache.put("https://example.com/a.jpg", b"hello").unwrap();

        assert!(cache.contains("https://example.com/a.jpg"));
        assert_eq!(
            cache.get("https://example.com/a.jpg").unwrap(),
            Some(b"hello".to_vec())
        );
        assert_eq!(cache.get("missing").unwrap(), None);
        assert_eq!(cache.size(), 5);
    }

    #[test]
    fn test_trim_keeps_size_within_max() {
        let (_temp, cache) = open(25);
        for i in 0..5 {
            cache.put(&format!("key-{i}"), &[0u8; 10]).unwrap();
        }
        assert!(cache.size() <= 25);
        assert!(cache.contains("key-4"));
    }

    #[test]
    fn test_clear_leaves_foreign_files() {
        let (_temp, cache) = open(1_000);
        cache.put("a", b"12345").unwrap();
        cache.put("b", b"67890").unwrap();
        fs::write(cache.dir().join("journal"), b"keep").unwrap();

        cache.clear().unwrap();

        assert_eq!(cache.size(), 0);
        assert!(!cache.contains("a"));
        assert!(cache.dir().join("journal").exists());
    }

    #[test]
    fn test_disabled_cache_skips_io() {
        let (_temp, cache) = open(1_000);
        cache.set_disabled(true);
        cache.put("a", b"12345").unwrap();
        assert!(!cache.contains("a"));
        assert_eq!(cache.get("a").unwrap(), None);
    }
}
