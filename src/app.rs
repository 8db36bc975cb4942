//! Application loop
//!
//! Ties the terminal surface, the launcher and the idle queue together on a
//! single-threaded event loop. Helper threads only ever post `AppEvent`s.

use crate::core::events::{AppEvent, EventReceiver, EventSender};
use crate::core::idle::{IdleQueue, IdleTask};
use crate::launcher::{LaunchError, SessionLauncher};
use crate::terminal::{TerminalConfigStore, TerminalSurface};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, error, info, warn};

/// How long the screen stays inverted for a visual bell
pub const FLASH_DURATION: Duration = Duration::from_millis(100);

/// Scrollback lines logged when the shell exits with an error
const EXIT_LOG_LINES: usize = 10;

/// What the loop should do after handling something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop with the given process exit status
    Quit(i32),
}

/// The running application
pub struct App<S: TerminalSurface> {
    surface: S,
    launcher: SessionLauncher,
    idle: IdleQueue,
    event_tx: EventSender,
    event_rx: EventReceiver,
    flashing: bool,
}

impl<S: TerminalSurface> App<S> {
    /// Configure `surface` from the settings store and fork its shell
    pub fn new(
        mut surface: S,
        store: &TerminalConfigStore,
        launcher: SessionLauncher,
        event_tx: EventSender,
        event_rx: EventReceiver,
    ) -> Result<Self> {
        let settings = store.load();
        TerminalConfigStore::apply(&mut surface, &settings);
        surface.fork_command().context("Failed to start the terminal shell")?;

        Ok(Self {
            surface,
            launcher,
            idle: IdleQueue::new(),
            event_tx,
            event_rx,
            flashing: false,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn launcher(&self) -> &SessionLauncher {
        &self.launcher
    }

    /// Sender for posting events to this app
    pub fn event_sender(&self) -> EventSender {
        self.event_tx.clone()
    }

    /// Start `game_file` once the loop is idle, unless a game has been
    /// opened by then.
    pub fn schedule_game(&mut self, game_file: PathBuf) {
        self.idle.post(IdleTask::StartGame(game_file));
    }

    /// Open a document: starts a session for it if none is running
    pub fn read_file(&mut self, file_path: &Path) -> Result<(), LaunchError> {
        match self.launcher.start(&mut self.surface, file_path) {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("Cannot start {:?}: {}", file_path, e);
                Err(e)
            }
        }
    }

    /// Run until the shell exits. Returns the process exit status.
    pub async fn run(&mut self) -> Result<i32> {
        loop {
            let flow = match self.event_rx.try_recv() {
                Ok(event) => self.handle_event(event)?,
                Err(TryRecvError::Empty) => match self.idle.pop() {
                    Some(task) => self.run_idle(task)?,
                    None => match self.event_rx.recv().await {
                        Some(event) => self.handle_event(event)?,
                        None => Flow::Quit(0),
                    },
                },
                Err(TryRecvError::Disconnected) => Flow::Quit(0),
            };

            if let Flow::Quit(code) = flow {
                return Ok(code);
            }
        }
    }

    fn run_idle(&mut self, task: IdleTask) -> Result<Flow> {
        match task {
            IdleTask::StartGame(game_file) => {
                self.read_file(&game_file)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Handle one event
    pub fn handle_event(&mut self, event: AppEvent) -> Result<Flow> {
        match event {
            AppEvent::OpenFile(path) => {
                self.read_file(&path)?;
            }
            AppEvent::Input(data) => {
                if let Err(e) = self.surface.send_input(&data) {
                    warn!("Dropped {} bytes of input: {:#}", data.len(), e);
                }
            }
            AppEvent::PtyOutput(data) => {
                let flashes = self.surface.display_output(&data)?;
                if flashes > 0 && !self.flashing {
                    self.start_flash()?;
                }
            }
            AppEvent::FlashEnd => {
                self.flashing = false;
                self.surface.flash(false)?;
            }
            AppEvent::Resize { rows, cols } => {
                debug!("Resizing terminal to {}x{}", cols, rows);
                if let Err(e) = self.surface.resize(rows, cols) {
                    warn!("{:#}", e);
                }
            }
            AppEvent::ChildExited(code) => {
                self.launcher.child_exited();
                if code != Some(0) {
                    let lines = self.surface.scrollback();
                    let tail = &lines[lines.len().saturating_sub(EXIT_LOG_LINES)..];
                    debug!("Shell exited with {:?}. Last output:\n{}", code, tail.join("\n"));
                }
                info!("Quitting...");
                return Ok(Flow::Quit(0));
            }
        }
        Ok(Flow::Continue)
    }

    fn start_flash(&mut self) -> Result<()> {
        self.flashing = true;
        self.surface.flash(true)?;
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(FLASH_DURATION).await;
            let _ = tx.send(AppEvent::FlashEnd);
        });
        Ok(())
    }
}
