//! Launcher module - Builds and issues the interpreter command line

mod arch;
mod command;
mod session;

pub use arch::Arch;
pub use command::{build_command, shell_quote, BANNER_LINES, BANNER_PAUSE_SECS};
pub use session::{GameSession, SessionLauncher, SessionState};

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while starting a game
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{0} hosts are not supported")]
    UnsupportedArchitecture(Arch),
    #[error("path is not valid UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),
    #[error("failed to send the launch command to the terminal")]
    Feed(#[source] anyhow::Error),
}
