//! Headless mode runner - main event loop without TUI
//!
//! Reads drawer commands from stdin and reports what happened as NDJSON.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use sketch_app::state::{AppState, StatusMessage, UiMode};
use sketch_app::{AppEvent, Engine, Message};
use sketch_core::prelude::*;

use super::HeadlessEvent;
use crate::{build_engine, Options};

/// How long `quit` waits for cache clears and stats refreshes still running
const QUIT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Commands accepted on stdin, one per line
pub const COMMANDS_HELP: &str =
    "open | close | next | prev | select | click <n> | pick <n> | cancel | bg <url> | list | quit";

/// Run in headless mode - output JSON events instead of TUI
pub async fn run_headless(options: Options) -> Result<()> {
    let mut engine = match build_engine(&options) {
        Ok(engine) => engine,
        Err(e) => {
            startup_failed(&e).emit();
            return Err(e);
        }
    };

    info!("═══════════════════════════════════════════════════════");
    info!("Sketch Drawer starting in HEADLESS mode");
    info!("═══════════════════════════════════════════════════════");

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    let mut bus_rx = engine.subscribe();
    HeadlessEvent::ready(engine.state.menu.len(), engine.state.config.log_level().label()).emit();

    let result = headless_event_loop(&mut engine, &mut bus_rx).await;

    info!("Sketch Drawer headless mode exiting");
    result
}

/// The run ends right after this one, so it is the only fatal error
fn startup_failed(error: &Error) -> HeadlessEvent {
    HeadlessEvent::error(format!("Startup failed: {}", error), true)
}

/// What the post-message pass compares against
struct Observed {
    mode: UiMode,
    status: Option<StatusMessage>,
}

impl Observed {
    fn of(state: &AppState) -> Self {
        Self {
            mode: state.ui_mode,
            status: state.status.clone(),
        }
    }
}

/// Main headless event loop
///
/// A `Quit` (stdin `quit`, EOF or a signal) is held back until background
/// work has reported, so every clear and refresh shows up in the output.
pub async fn headless_event_loop(
    engine: &mut Engine,
    bus_rx: &mut broadcast::Receiver<AppEvent>,
) -> Result<()> {
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match engine.msg_rx.recv().await {
            Some(Message::Quit) => {
                settle_before_quit(engine, bus_rx).await;
                handle_message(engine, bus_rx, Message::Quit);
            }
            Some(msg) => handle_message(engine, bus_rx, msg),
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    Ok(())
}

fn handle_message(engine: &mut Engine, bus_rx: &mut broadcast::Receiver<AppEvent>, msg: Message) {
    emit_pre_message_events(&engine.state, &msg);

    let before = Observed::of(&engine.state);
    engine.process_message(msg);

    emit_bus_events(bus_rx);
    emit_post_message_events(&before, &engine.state);
}

/// Process queued messages until no background task is left
async fn settle_before_quit(engine: &mut Engine, bus_rx: &mut broadcast::Receiver<AppEvent>) {
    let settle = async {
        while let Some(msg) = engine.next_pending_message().await {
            // Later quits collapse into the one being handled
            if msg != Message::Quit {
                handle_message(engine, bus_rx, msg);
            }
        }
    };

    if tokio::time::timeout(QUIT_GRACE_PERIOD, settle).await.is_err() {
        warn!(
            "Quitting with {} background task(s) still running",
            engine.background_tasks()
        );
    }
}

/// Emit events before message processing
fn emit_pre_message_events(state: &AppState, msg: &Message) {
    match msg {
        Message::RequestMenuSnapshot => {
            HeadlessEvent::menu(
                mode_name(state.ui_mode),
                state.menu_view.selected_index,
                state.menu_rows(),
            )
            .emit();
        }
        Message::CacheStatsLoaded(stats) => {
            HeadlessEvent::cache_stats(stats.clone()).emit();
        }
        _ => {}
    }
}

/// Forward everything the bus published during processing
fn emit_bus_events(bus_rx: &mut broadcast::Receiver<AppEvent>) {
    loop {
        match bus_rx.try_recv() {
            Ok(event) => {
                if let AppEvent::ChangePage { page } = &event {
                    HeadlessEvent::page_changed(*page).emit();
                }
                HeadlessEvent::bus(event).emit();
            }
            Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                warn!("Headless output skipped {} bus events", missed);
            }
            Err(_) => break,
        }
    }
}

/// Emit events after message processing based on state changes
fn emit_post_message_events(before: &Observed, state: &AppState) {
    if state.ui_mode != before.mode {
        HeadlessEvent::mode_changed(mode_name(state.ui_mode)).emit();
    }

    if state.status != before.status {
        if let Some(status) = &state.status {
            if status.is_error {
                HeadlessEvent::error(status.text.clone(), false).emit();
            } else {
                HeadlessEvent::status(status.text.clone()).emit();
            }
        }
    }
}

pub fn mode_name(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Main => "main",
        UiMode::Drawer => "drawer",
        UiMode::LogLevelDialog => "log_level_dialog",
    }
}

/// Result of parsing one stdin line
#[derive(Debug, PartialEq)]
pub enum StdinCommand {
    Send(Message),
    Quit,
    Empty,
    Invalid(String),
}

/// Parse one stdin line into a message
pub fn parse_command(line: &str) -> StdinCommand {
    let trimmed = line.trim();
    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (trimmed, ""),
    };

    let message = match (command, arg) {
        ("", _) => return StdinCommand::Empty,
        ("q" | "quit", "") => return StdinCommand::Quit,
        ("open", "") => Message::OpenDrawer,
        ("close", "") => Message::CloseDrawer,
        ("next", "") => Message::SelectNext,
        ("prev", "") => Message::SelectPrevious,
        ("select", "") => Message::ActivateSelected,
        ("cancel", "") => Message::LogLevelDialogCancel,
        ("list", "") => Message::RequestMenuSnapshot,
        ("click", n) => match n.parse() {
            Ok(index) => Message::ActivateIndex(index),
            Err(_) => return StdinCommand::Invalid(format!("click expects a row index, got '{}'", n)),
        },
        ("pick", n) => match n.parse() {
            Ok(index) => Message::LogLevelPicked(index),
            Err(_) => return StdinCommand::Invalid(format!("pick expects a level index, got '{}'", n)),
        },
        ("bg", url) if !url.is_empty() => Message::SetBackground(url.to_string()),
        _ => {
            return StdinCommand::Invalid(format!(
                "Unknown command '{}' (expected {})",
                trimmed, COMMANDS_HELP
            ))
        }
    };

    StdinCommand::Send(message)
}

/// Read stdin lines and forward them to the message channel (blocking version)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            StdinCommand::Send(msg) => {
                if msg_tx.blocking_send(msg).is_err() {
                    break;
                }
            }
            StdinCommand::Quit => {
                info!("Stdin: quit requested");
                break;
            }
            StdinCommand::Empty => {}
            StdinCommand::Invalid(reason) => {
                warn!("{}", reason);
                HeadlessEvent::error(reason, false).emit();
            }
        }
    }

    // Reached on `quit` and on EOF
    let _ = msg_tx.blocking_send(Message::Quit);
    info!("Stdin reader exiting");
}
