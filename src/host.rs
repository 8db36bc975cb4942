//! Host terminal plumbing
//!
//! Raw mode for the terminal we run in, plus the helper threads and tasks
//! that turn keystrokes and window size changes into `AppEvent`s.

use crate::core::events::{AppEvent, EventSender};
use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};
use tracing::{debug, warn};

/// Keeps the host terminal in raw mode until dropped
pub struct RawModeGuard {
    enabled: bool,
}

impl RawModeGuard {
    /// Enter raw mode if stdin is a terminal
    pub fn enter() -> Result<Self> {
        if !std::io::stdin().is_terminal() {
            debug!("stdin is not a terminal, leaving it in cooked mode");
            return Ok(Self { enabled: false });
        }
        crossterm::terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self { enabled: true })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.enabled {
            if let Err(e) = crossterm::terminal::disable_raw_mode() {
                warn!("Failed to restore terminal mode: {}", e);
            }
        }
    }
}

/// Forward stdin to the app as `AppEvent::Input`
pub fn spawn_stdin_reader(event_tx: EventSender) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut stdin = std::io::stdin();
        let mut buffer = [0u8; 1024];
        loop {
            match stdin.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => {
                    if event_tx.send(AppEvent::Input(buffer[..n].to_vec())).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!("stdin read error: {}", e);
                    break;
                }
            }
        }
        debug!("stdin reader finished");
    })
}

/// Post `AppEvent::Resize` whenever the host terminal changes size
#[cfg(unix)]
pub fn spawn_resize_watcher(event_tx: EventSender) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut winch = signal(SignalKind::window_change()).context("Failed to watch SIGWINCH")?;
    tokio::spawn(async move {
        while winch.recv().await.is_some() {
            match crossterm::terminal::size() {
                Ok((cols, rows)) => {
                    if event_tx.send(AppEvent::Resize { rows, cols }).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Failed to read terminal size: {}", e),
            }
        }
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn spawn_resize_watcher(_event_tx: EventSender) -> Result<()> {
    Ok(())
}
