//! Terminal module - Settings and the terminal surface capability
//!
//! This module provides:
//! - `TerminalSettings`: the typed `terminalrc` options and their defaults
//! - `TerminalConfigStore`: load/persist/apply for those settings
//! - `TerminalSurface`: the trait a terminal implementation provides
//! - `OutputFilter`: bell-aware output pass-through with scrollback

mod output;
pub mod rcfile;
pub mod settings;
mod store;
mod surface;

pub use output::{Filtered, OutputFilter};
pub use rcfile::RcFile;
pub use settings::{Color, FontDescription, OptionError, TerminalOption, TerminalSettings};
pub use store::{resolve, Resolved, TerminalConfigStore, FILE_NAME, SECTION};
pub use surface::TerminalSurface;
