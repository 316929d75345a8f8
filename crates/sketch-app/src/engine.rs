//! Engine - shared orchestration for the TUI and headless runners
//!
//! Owns the TEA state, the message channel, the event bus, the cache services
//! and the log control. Both frontends feed it messages and read its state.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use sketch_cache::CacheServices;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use crate::actions::{self, ActionContext, BackgroundTasks};
use crate::config::load_config;
use crate::event_bus::{AppEvent, EventBus};
use crate::handler;
use crate::log_control::LogControl;
use crate::message::Message;
use crate::signals;
use crate::state::AppState;

/// Capacity of the message channel
pub const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// How often [`Engine::next_pending_message`] rechecks running tasks
const PENDING_POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the message channel. Clone for input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half; the frontend loop drains it
    pub msg_rx: mpsc::Receiver<Message>,

    bus: EventBus,

    action_ctx: ActionContext,

    signal_task: JoinHandle<()>,
}

impl Engine {
    /// Create an engine with settings loaded from `config_dir`.
    ///
    /// Applies the stored cache switches and log filter once, and spawns the
    /// signal handler, so it must be called inside a tokio runtime.
    pub fn new(config_dir: PathBuf, caches: CacheServices, log_control: Arc<dyn LogControl>) -> Self {
        let config = load_config(&config_dir);
        let state = AppState::new(config, config_dir);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let signal_task = signals::spawn_signal_handler(msg_tx.clone());

        let action_ctx = ActionContext {
            caches,
            log_control,
            tasks: BackgroundTasks::default(),
        };
        actions::apply_config_effects(
            &state.config,
            &action_ctx.caches,
            action_ctx.log_control.as_ref(),
        );

        info!(
            "Engine ready: {} menu rows, log level {}",
            state.menu.len(),
            state.config.log_level()
        );

        Self {
            state,
            msg_tx,
            msg_rx,
            bus: EventBus::new(),
            action_ctx,
            signal_task,
        }
    }

    /// Subscribe to bus events. Every event posted during processing is
    /// broadcast here before the app itself reacts to it.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.bus.subscribe()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn caches(&self) -> &CacheServices {
        &self.action_ctx.caches
    }

    /// Run a message through update, dispatch resulting actions, then
    /// publish queued bus events and feed them back as `Message::Bus`.
    /// Results of actions that finish immediately are processed right after
    /// those events, without a round trip through the channel.
    pub fn process_message(&mut self, msg: Message) {
        let mut queue = VecDeque::from([msg]);

        while let Some(message) = queue.pop_front() {
            let mut replies = Vec::new();
            let mut next = Some(message);
            while let Some(m) = next {
                let result = handler::update(&mut self.state, m);
                if let Some(action) = result.action {
                    replies.extend(actions::handle_action(
                        action,
                        self.msg_tx.clone(),
                        &self.action_ctx,
                    ));
                }
                next = result.message;
            }

            for event in self.state.take_pending_events() {
                self.bus.post(event.clone());
                queue.push_back(Message::Bus(event));
            }
            queue.extend(replies);
        }
    }

    /// Process everything currently queued on the channel.
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Clears and stats refreshes that have not delivered their result yet
    pub fn background_tasks(&self) -> usize {
        self.action_ctx.tasks.running()
    }

    /// Next queued message, waiting for it while background work is still
    /// running. `None` once the channel is empty and nothing is in flight.
    pub async fn next_pending_message(&mut self) -> Option<Message> {
        loop {
            // Tasks send before they stop counting, so read the count first
            let idle = self.background_tasks() == 0;
            if let Ok(msg) = self.msg_rx.try_recv() {
                return Some(msg);
            }
            if idle {
                return None;
            }
            tokio::select! {
                msg = self.msg_rx.recv() => return msg,
                _ = tokio::time::sleep(PENDING_POLL_INTERVAL) => {}
            }
        }
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.signal_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigKey;
    use crate::log_control::NoopLogControl;
    use crate::menu::{InfoKind, MenuEntry};
    use crate::state::UiMode;
    use sketch_cache::{CacheKind, CacheStore};
    use std::time::Duration;
    use tempfile::TempDir;

    fn engine() -> (TempDir, Engine) {
        let temp = TempDir::new().unwrap();
        let caches = CacheServices::open(&temp.path().join("cache"), true).unwrap();
        let engine = Engine::new(
            temp.path().join("config"),
            caches,
            Arc::new(NoopLogControl),
        );
        (temp, engine)
    }

    fn row_of(engine: &Engine, f: impl Fn(&MenuEntry) -> bool) -> usize {
        engine.state.menu.iter().position(f).unwrap()
    }

    /// Process channel messages until `done` holds or a timeout elapses
    async fn pump_until(engine: &mut Engine, done: impl Fn(&Engine) -> bool) {
        for _ in 0..200 {
            engine.drain_pending_messages();
            if done(engine) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached");
    }

    fn drain_events(rx: &mut broadcast::Receiver<AppEvent>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_open_drawer_publishes_and_refreshes() {
        let (_temp, mut engine) = engine();
        let mut rx = engine.subscribe();

        engine.process_message(Message::OpenDrawer);

        assert_eq!(engine.state.ui_mode, UiMode::Drawer);
        assert_eq!(drain_events(&mut rx), vec![AppEvent::DrawerOpened]);

        pump_until(&mut engine, |e| e.state.cache_stats.len() == 3).await;
        assert!(engine.state.cache_stats[&CacheKind::Memory].size > 0);
    }

    #[tokio::test]
    async fn test_memory_clear_closes_drawer_and_announces() {
        let (_temp, mut engine) = engine();
        let mut rx = engine.subscribe();
        engine.process_message(Message::OpenDrawer);

        let row = row_of(&engine, |e| {
            matches!(e, MenuEntry::Info(i) if i.kind == InfoKind::Cache(CacheKind::Memory))
        });
        engine.process_message(Message::ActivateIndex(row));
        engine.drain_pending_messages();

        assert_eq!(engine.caches().memory.size(), 0);
        assert_eq!(engine.state.ui_mode, UiMode::Main);
        let events = drain_events(&mut rx);
        assert!(events.ends_with(&[
            AppEvent::CloseDrawer,
            AppEvent::CacheCleaned {
                cache: CacheKind::Memory
            },
        ]));
    }

    #[tokio::test]
    async fn test_memory_clear_survives_full_channel() {
        let (_temp, mut engine) = engine();
        let mut rx = engine.subscribe();
        engine.process_message(Message::OpenDrawer);
        while engine.msg_tx.try_send(Message::Tick).is_ok() {}

        let row = row_of(&engine, |e| {
            matches!(e, MenuEntry::Info(i) if i.kind == InfoKind::Cache(CacheKind::Memory))
        });
        engine.process_message(Message::ActivateIndex(row));

        assert_eq!(engine.state.ui_mode, UiMode::Main);
        assert!(drain_events(&mut rx).contains(&AppEvent::CacheCleaned {
            cache: CacheKind::Memory
        }));
    }

    #[tokio::test]
    async fn test_pending_messages_wait_for_disk_clear() {
        let (_temp, mut engine) = engine();
        let mut rx = engine.subscribe();
        engine.process_message(Message::OpenDrawer);

        let row = row_of(&engine, |e| {
            matches!(e, MenuEntry::Info(i) if i.kind == InfoKind::Cache(CacheKind::Disk))
        });
        engine.process_message(Message::ActivateIndex(row));
        assert!(engine.background_tasks() > 0);

        while let Some(msg) = engine.next_pending_message().await {
            engine.process_message(msg);
        }

        assert_eq!(engine.background_tasks(), 0);
        assert_eq!(engine.state.ui_mode, UiMode::Main);
        assert!(drain_events(&mut rx).contains(&AppEvent::CacheCleaned {
            cache: CacheKind::Disk
        }));
        assert_eq!(engine.caches().disk.size(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_rapid_toggles_persist_latest_config() {
        let (temp, mut engine) = engine();
        let keys = [
            ConfigKey::GlobalDisableCacheInMemory,
            ConfigKey::ReadMode,
            ConfigKey::PlayGifOnList,
            ConfigKey::ShowGifFlag,
        ];

        for _ in 0..3 {
            for key in keys {
                engine.process_message(Message::OpenDrawer);
                let row = row_of(&engine, |e| matches!(e, MenuEntry::Check(c) if c.key == key));
                engine.process_message(Message::ActivateIndex(row));
            }
        }

        assert_eq!(load_config(&temp.path().join("config")), engine.state.config);
        assert!(engine.state.status.is_none());
    }

    #[tokio::test]
    async fn test_disk_clear_completes_in_background() {
        let (_temp, mut engine) = engine();
        let mut rx = engine.subscribe();
        engine.process_message(Message::OpenDrawer);

        let row = row_of(&engine, |e| {
            matches!(e, MenuEntry::Info(i) if i.kind == InfoKind::Cache(CacheKind::Disk))
        });
        engine.process_message(Message::ActivateIndex(row));

        pump_until(&mut engine, |e| e.state.ui_mode == UiMode::Main).await;

        assert_eq!(engine.caches().disk.size(), 0);
        assert!(drain_events(&mut rx).contains(&AppEvent::CacheCleaned {
            cache: CacheKind::Disk
        }));
    }

    #[tokio::test]
    async fn test_disable_toggle_switches_cache_and_persists() {
        let (temp, mut engine) = engine();
        engine.process_message(Message::OpenDrawer);

        let row = row_of(&engine, |e| {
            matches!(e, MenuEntry::Check(c) if c.key == ConfigKey::GlobalDisableCacheInDisk)
        });
        engine.process_message(Message::ActivateIndex(row));

        assert!(engine.caches().disk.is_disabled());
        assert_eq!(engine.state.ui_mode, UiMode::Main);

        let saved = load_config(&temp.path().join("config"));
        assert!(saved.get_bool(ConfigKey::GlobalDisableCacheInDisk));
    }

    #[tokio::test]
    async fn test_page_with_cover_changes_background() {
        let (_temp, mut engine) = engine();
        let mut rx = engine.subscribe();
        engine.process_message(Message::OpenDrawer);

        let row = row_of(&engine, |e| {
            matches!(e, MenuEntry::Page(p) if p.background_url().is_some())
        });
        engine.process_message(Message::ActivateIndex(row));

        assert!(engine.state.background_url.is_some());
        assert_eq!(engine.state.ui_mode, UiMode::Main);
        let events = drain_events(&mut rx);
        assert!(matches!(events.last(), Some(AppEvent::ChangeMainPageBg { .. })));
    }
}
