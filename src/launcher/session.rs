//! Game session lifecycle

use super::{build_command, Arch, LaunchError};
use crate::core::config::InterpreterConfig;
use crate::terminal::TerminalSurface;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where a session is in its single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    /// The command line has been typed into the shell
    Started,
    /// The shell exited; terminal
    Exited,
}

/// The one interpreter run of an application instance
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    /// Game the session was started with
    pub game_file: Option<PathBuf>,
    /// Directory saved games are written to
    pub save_dir: PathBuf,
    state: SessionState,
}

impl GameSession {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            game_file: None,
            save_dir: save_dir.into(),
            state: SessionState::NotStarted,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a game was ever started
    pub fn is_started(&self) -> bool {
        self.state != SessionState::NotStarted
    }

    /// Record that the shell exited
    pub fn mark_exited(&mut self) {
        self.state = SessionState::Exited;
    }
}

/// Types the interpreter command into a terminal, at most once
#[derive(Debug, Clone)]
pub struct SessionLauncher {
    session: GameSession,
    arch: Arch,
    interpreters: InterpreterConfig,
}

impl SessionLauncher {
    pub fn new(save_dir: impl Into<PathBuf>, arch: Arch, interpreters: InterpreterConfig) -> Self {
        Self {
            session: GameSession::new(save_dir),
            arch,
            interpreters,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Command line that would run `game_file`
    pub fn build_command(&self, game_file: &Path) -> Result<String, LaunchError> {
        build_command(game_file, &self.session.save_dir, self.arch, &self.interpreters)
    }

    /// Start `game_file` unless a session was already started.
    ///
    /// Returns `Ok(true)` when the command was fed to the surface and
    /// `Ok(false)` when this call was a no-op.
    pub fn start(
        &mut self,
        surface: &mut dyn TerminalSurface,
        game_file: &Path,
    ) -> Result<bool, LaunchError> {
        if self.session.is_started() {
            debug!("Game already started, ignoring {:?}", game_file);
            return Ok(false);
        }

        let command = self.build_command(game_file)?;

        self.session.state = SessionState::Started;
        self.session.game_file = Some(game_file.to_path_buf());
        info!("Starting game {:?} in {:?}", game_file, self.session.save_dir);

        surface.feed_child(&command).map_err(LaunchError::Feed)?;
        Ok(true)
    }

    /// The shell exited; no further starts are possible
    pub fn child_exited(&mut self) {
        self.session.mark_exited();
    }
}
