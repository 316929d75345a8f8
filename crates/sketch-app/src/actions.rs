//! Action handlers: UpdateAction dispatch and background task spawning

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sketch_cache::{CacheKind, CacheServices, CacheStore};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::config::{AppConfig, ConfigKey};
use crate::log_control::LogControl;
use crate::message::Message;
use crate::UpdateAction;

/// What actions need beyond the message channel
#[derive(Clone)]
pub struct ActionContext {
    pub caches: CacheServices,
    pub log_control: Arc<dyn LogControl>,
    pub tasks: BackgroundTasks,
}

/// Counts spawned clears and refreshes until each has delivered its result
#[derive(Debug, Clone, Default)]
pub struct BackgroundTasks {
    running: Arc<AtomicUsize>,
}

impl BackgroundTasks {
    pub fn running(&self) -> usize {
        self.running.load(Ordering::Acquire)
    }

    /// Spawn `task`; the count drops only after it completes, so anything it
    /// sent is already queued by then.
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let guard = TaskGuard::new(&self.running);
        tokio::spawn(async move {
            task.await;
            drop(guard);
        });
    }
}

struct TaskGuard(Arc<AtomicUsize>);

impl TaskGuard {
    fn new(running: &Arc<AtomicUsize>) -> Self {
        running.fetch_add(1, Ordering::AcqRel);
        Self(running.clone())
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Execute an action, spawning background work where needed.
///
/// Work finished on the spot hands its result back as the returned message,
/// which the caller queues ahead of anything waiting on the channel.
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    ctx: &ActionContext,
) -> Option<Message> {
    match action {
        UpdateAction::RefreshCacheStats => {
            spawn_stats_refresh(ctx, msg_tx);
            None
        }

        UpdateAction::ClearCache(cache) => {
            let store = ctx.caches.get(cache).clone();
            if cache.clears_in_background() {
                spawn_cache_clear(ctx, store, msg_tx);
                None
            } else {
                Some(clear_cache_now(store.as_ref()))
            }
        }

        UpdateAction::ConfigChanged { key, config } => {
            debug!("Config changed: {}", key);
            if key.affects_logging() || is_cache_switch(key) {
                apply_config_effects(&config, &ctx.caches, ctx.log_control.as_ref());
            }
            spawn_stats_refresh(ctx, msg_tx);
            None
        }
    }
}

fn is_cache_switch(key: ConfigKey) -> bool {
    matches!(
        key,
        ConfigKey::GlobalDisableCacheInMemory
            | ConfigKey::GlobalDisableBitmapPool
            | ConfigKey::GlobalDisableCacheInDisk
    )
}

/// Push cache disable flags and the log filter from `config` into the live
/// services
pub fn apply_config_effects(config: &AppConfig, caches: &CacheServices, log_control: &dyn LogControl) {
    caches
        .memory
        .set_disabled(config.get_bool(ConfigKey::GlobalDisableCacheInMemory));
    caches
        .bitmap_pool
        .set_disabled(config.get_bool(ConfigKey::GlobalDisableBitmapPool));
    caches
        .disk
        .set_disabled(config.get_bool(ConfigKey::GlobalDisableCacheInDisk));

    if let Err(e) = log_control.apply(&config.log_filter_spec()) {
        warn!("Failed to apply log filter: {}", e);
    }
}

/// Clear on the caller's thread; used for the in-memory stores
fn clear_cache_now(store: &dyn CacheStore) -> Message {
    let cache = store.kind();
    match store.clear() {
        Ok(()) => Message::CacheCleared(cache),
        Err(e) => Message::CacheClearFailed {
            cache,
            error: e.to_string(),
        },
    }
}

/// Clear on a blocking task; used for the disk cache
fn spawn_cache_clear(ctx: &ActionContext, store: Arc<dyn CacheStore>, msg_tx: mpsc::Sender<Message>) {
    ctx.tasks.spawn(async move {
        let cache = store.kind();
        let msg = match tokio::task::spawn_blocking(move || store.clear()).await {
            Ok(Ok(())) => Message::CacheCleared(cache),
            Ok(Err(e)) => Message::CacheClearFailed {
                cache,
                error: e.to_string(),
            },
            Err(e) => Message::CacheClearFailed {
                cache,
                error: format!("clear task failed: {}", e),
            },
        };
        if msg_tx.send(msg).await.is_err() {
            warn!("{} cache clear finished after the engine stopped", cache);
        }
    });
}

fn spawn_stats_refresh(ctx: &ActionContext, msg_tx: mpsc::Sender<Message>) {
    let caches = ctx.caches.clone();
    ctx.tasks.spawn(async move {
        // Disk size walks the cache directory
        match tokio::task::spawn_blocking(move || caches.snapshot()).await {
            Ok(stats) => {
                let _ = msg_tx.send(Message::CacheStatsLoaded(stats)).await;
            }
            Err(e) => error!("Cache stats task failed: {}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_control::MockLogControl;
    use mockall::predicate::eq;
    use sketch_core::Error;
    use std::time::Duration;

    mockall::mock! {
        pub Store {}
        impl CacheStore for Store {
            fn kind(&self) -> CacheKind;
            fn size(&self) -> u64;
            fn max_size(&self) -> u64;
            fn clear(&self) -> sketch_core::Result<()>;
            fn set_disabled(&self, disabled: bool);
            fn is_disabled(&self) -> bool;
        }
    }

    fn quiet_store(kind: CacheKind) -> MockStore {
        let mut store = MockStore::new();
        store.expect_kind().return_const(kind);
        store.expect_size().return_const(10u64);
        store.expect_max_size().return_const(100u64);
        store.expect_is_disabled().return_const(false);
        store.expect_set_disabled().return_const(());
        store
    }

    fn services(memory: MockStore, bitmap_pool: MockStore, disk: MockStore) -> CacheServices {
        CacheServices::new(Arc::new(memory), Arc::new(bitmap_pool), Arc::new(disk))
    }

    fn context(caches: CacheServices, log_control: MockLogControl) -> ActionContext {
        ActionContext {
            caches,
            log_control: Arc::new(log_control),
            tasks: BackgroundTasks::default(),
        }
    }

    async fn recv(rx: &mut mpsc::Receiver<Message>) -> Message {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for message")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_memory_clear_returns_result_directly() {
        let mut memory = quiet_store(CacheKind::Memory);
        memory.expect_clear().times(1).returning(|| Ok(()));
        let caches = services(
            memory,
            quiet_store(CacheKind::BitmapPool),
            quiet_store(CacheKind::Disk),
        );
        let ctx = context(caches, MockLogControl::new());
        let (tx, mut rx) = mpsc::channel(1);
        // A full channel must not lose the result
        tx.try_send(Message::Tick).unwrap();

        let reply = handle_action(UpdateAction::ClearCache(CacheKind::Memory), tx, &ctx);

        assert_eq!(reply, Some(Message::CacheCleared(CacheKind::Memory)));
        assert_eq!(rx.try_recv().unwrap(), Message::Tick);
        assert!(rx.try_recv().is_err());
        assert_eq!(ctx.tasks.running(), 0);
    }

    #[tokio::test]
    async fn test_bitmap_pool_clear_failure_is_returned() {
        let mut pool = quiet_store(CacheKind::BitmapPool);
        pool.expect_clear()
            .times(1)
            .returning(|| Err(Error::cache("Bitmap Pool", "poisoned")));
        let caches = services(quiet_store(CacheKind::Memory), pool, quiet_store(CacheKind::Disk));
        let ctx = context(caches, MockLogControl::new());
        let (tx, _rx) = mpsc::channel(8);

        let reply = handle_action(UpdateAction::ClearCache(CacheKind::BitmapPool), tx, &ctx);

        assert!(matches!(
            reply,
            Some(Message::CacheClearFailed {
                cache: CacheKind::BitmapPool,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_disk_clear_runs_in_background() {
        let mut disk = quiet_store(CacheKind::Disk);
        disk.expect_clear().times(1).returning(|| Ok(()));
        let caches = services(
            quiet_store(CacheKind::Memory),
            quiet_store(CacheKind::BitmapPool),
            disk,
        );
        let ctx = context(caches, MockLogControl::new());
        let (tx, mut rx) = mpsc::channel(8);

        let reply = handle_action(UpdateAction::ClearCache(CacheKind::Disk), tx, &ctx);
        assert!(reply.is_none());
        assert_eq!(ctx.tasks.running(), 1);

        assert!(matches!(
            recv(&mut rx).await,
            Message::CacheCleared(CacheKind::Disk)
        ));
        for _ in 0..100 {
            if ctx.tasks.running() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(ctx.tasks.running(), 0);
    }

    #[tokio::test]
    async fn test_disk_clear_failure_is_reported() {
        let mut disk = quiet_store(CacheKind::Disk);
        disk.expect_clear()
            .times(1)
            .returning(|| Err(Error::cache("Disk", "read-only file system")));
        let caches = services(
            quiet_store(CacheKind::Memory),
            quiet_store(CacheKind::BitmapPool),
            disk,
        );
        let ctx = context(caches, MockLogControl::new());
        let (tx, mut rx) = mpsc::channel(8);

        handle_action(UpdateAction::ClearCache(CacheKind::Disk), tx, &ctx);

        match recv(&mut rx).await {
            Message::CacheClearFailed { cache, error } => {
                assert_eq!(cache, CacheKind::Disk);
                assert!(error.contains("read-only"));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_sends_stats_for_every_cache() {
        let caches = services(
            quiet_store(CacheKind::Memory),
            quiet_store(CacheKind::BitmapPool),
            quiet_store(CacheKind::Disk),
        );
        let ctx = context(caches, MockLogControl::new());
        let (tx, mut rx) = mpsc::channel(8);

        handle_action(UpdateAction::RefreshCacheStats, tx, &ctx);

        match recv(&mut rx).await {
            Message::CacheStatsLoaded(stats) => {
                assert_eq!(stats.len(), 3);
                assert!(stats.iter().all(|s| s.size == 10 && s.max_size == 100));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_apply_config_effects_sets_flags_and_filter() {
        let mut memory = MockStore::new();
        memory.expect_set_disabled().with(eq(true)).times(1).return_const(());
        let mut bitmap_pool = MockStore::new();
        bitmap_pool
            .expect_set_disabled()
            .with(eq(false))
            .times(1)
            .return_const(());
        let mut disk = MockStore::new();
        disk.expect_set_disabled().with(eq(false)).times(1).return_const(());

        let mut log_control = MockLogControl::new();
        log_control
            .expect_apply()
            .withf(|spec| spec.level == sketch_core::LogLevel::Error && spec.sync_to_disk)
            .times(1)
            .returning(|_| Ok(()));

        let mut config = AppConfig::new();
        config.put_bool(ConfigKey::GlobalDisableCacheInMemory, true);
        config.put_bool(ConfigKey::OutLog2Sdcard, true);
        config.set_log_level(sketch_core::LogLevel::Error);

        apply_config_effects(&config, &services(memory, bitmap_pool, disk), &log_control);
    }

    #[tokio::test]
    async fn test_log_level_change_reapplies_filter_and_refreshes() {
        let caches = services(
            quiet_store(CacheKind::Memory),
            quiet_store(CacheKind::BitmapPool),
            quiet_store(CacheKind::Disk),
        );
        let mut log_control = MockLogControl::new();
        log_control
            .expect_apply()
            .withf(|spec| spec.level == sketch_core::LogLevel::Debug)
            .times(1)
            .returning(|_| Ok(()));
        let ctx = context(caches, log_control);
        let (tx, mut rx) = mpsc::channel(8);

        let mut config = AppConfig::new();
        config.set_log_level(sketch_core::LogLevel::Debug);
        let reply = handle_action(
            UpdateAction::ConfigChanged {
                key: ConfigKey::LogLevel,
                config,
            },
            tx,
            &ctx,
        );

        assert!(reply.is_none());
        assert!(matches!(recv(&mut rx).await, Message::CacheStatsLoaded(_)));
    }

    #[tokio::test]
    async fn test_display_toggle_skips_side_effects() {
        let caches = services(
            quiet_store(CacheKind::Memory),
            quiet_store(CacheKind::BitmapPool),
            quiet_store(CacheKind::Disk),
        );
        // No expectation: any apply() call fails the test
        let ctx = context(caches, MockLogControl::new());
        let (tx, mut rx) = mpsc::channel(8);

        let mut config = AppConfig::new();
        config.put_bool(ConfigKey::ReadMode, false);
        handle_action(
            UpdateAction::ConfigChanged {
                key: ConfigKey::ReadMode,
                config,
            },
            tx,
            &ctx,
        );

        assert!(matches!(recv(&mut rx).await, Message::CacheStatsLoaded(_)));
    }
}
