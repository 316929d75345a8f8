//! Main TUI runner - entry point and event loop

use sketch_app::Engine;
use sketch_core::Result;
use tracing::{debug, info};

use super::{event, render, terminal};

/// Run the drawer TUI until the user quits or a signal arrives
pub async fn run(mut engine: Engine) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut term = ratatui::init();
    info!("TUI started");

    let result = run_loop(&mut term, &mut engine);

    ratatui::restore();
    info!("TUI stopped");
    result
}

/// Main event loop
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Results of background work (cache stats, clears, config saves, signals)
        let drained = engine.drain_pending_messages();
        if drained > 0 {
            debug!("Processed {} background messages", drained);
        }

        terminal.draw(|frame| render::view(frame, &mut engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
