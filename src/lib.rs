//! Frotz terminal front-end
//!
//! Runs the frotz interactive fiction interpreter inside a terminal session.
//!
//! # Features
//! - Hosts an interactive shell in a PTY relayed to the current terminal
//! - Reads terminal appearance from `terminalrc`, writing back any defaults
//! - Types the interpreter command line into the shell once the app is idle
//! - Picks the interpreter build from the host architecture
//! - Keeps saved games in a persistent per-instance directory

pub mod app;
pub mod core;
pub mod host;
pub mod launcher;
pub mod pty;
pub mod terminal;

pub use app::{App, Flow};
pub use crate::core::config::Config;
pub use crate::core::events::AppEvent;
pub use launcher::{build_command, Arch, GameSession, LaunchError, SessionLauncher, SessionState};
pub use terminal::{TerminalConfigStore, TerminalSettings, TerminalSurface};
