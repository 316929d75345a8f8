//! Ctrl+C / SIGTERM become `Message::Quit`

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::message::Message;

/// Forward the first shutdown signal to the engine. The engine aborts the
/// returned task when it is dropped.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let signal = match shutdown_signal().await {
            Ok(signal) => signal,
            Err(e) => {
                warn!("Signals will not stop the drawer: {}", e);
                return;
            }
        };

        info!("{} received, quitting", signal);
        if tx.send(Message::Quit).await.is_err() {
            debug!("Engine stopped before {} was delivered", signal);
        }
    })
}

/// Resolves with the name of the signal that arrived
async fn shutdown_signal() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
            _ = terminate.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map(|()| "Ctrl+C")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_nothing_sent_without_a_signal() {
        let (tx, mut rx) = mpsc::channel::<Message>(1);

        let handle = spawn_signal_handler(tx);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(rx.try_recv().is_err());
        assert!(!handle.is_finished());
        handle.abort();
    }
}
