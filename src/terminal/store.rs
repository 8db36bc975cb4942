//! Terminal settings persistence
//!
//! Loads `terminalrc`, fills in a default for every missing or malformed
//! option, writes the defaults back and applies the result to a surface.

use super::rcfile::RcFile;
use super::settings::{TerminalOption, TerminalSettings};
use super::surface::TerminalSurface;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Section the options live in
pub const SECTION: &str = "terminal";

/// File name of the settings file inside the profile directory
pub const FILE_NAME: &str = "terminalrc";

/// Outcome of resolving settings against a file
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub settings: TerminalSettings,
    /// Options that were absent or malformed and now hold their default
    pub defaulted: Vec<TerminalOption>,
}

/// Reads and writes the terminal settings file
#[derive(Debug, Clone)]
pub struct TerminalConfigStore {
    path: PathBuf,
}

impl TerminalConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `terminalrc` inside `profile_dir`
    pub fn in_profile(profile_dir: &Path) -> Self {
        Self::new(profile_dir.join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, persisting any defaults that had to be filled in.
    ///
    /// Never fails: unreadable files and bad values fall back to defaults
    /// with a warning. A file that exists but cannot be read, or that has
    /// lines the parser had to skip, is left alone.
    pub fn load(&self) -> TerminalSettings {
        let (mut file, writable) = match RcFile::read(&self.path) {
            Ok(file) if !file.is_lossless() => {
                warn!("Not rewriting {:?}: it has lines that could not be parsed", self.path);
                (file, false)
            }
            Ok(file) => (file, true),
            Err(e) => {
                warn!("Using default terminal settings: {:#}", e);
                (RcFile::new(), false)
            }
        };

        let resolved = resolve(&mut file);

        if resolved.defaulted.is_empty() {
            debug!("Terminal settings loaded from {:?}", self.path);
        } else if writable {
            match file.write(&self.path) {
                Ok(()) => info!(
                    "Wrote {} default terminal setting(s) to {:?}",
                    resolved.defaulted.len(),
                    self.path
                ),
                Err(e) => warn!("Failed to persist terminal settings: {:#}", e),
            }
        }

        resolved.settings
    }

    /// Push every setting onto the surface
    pub fn apply(surface: &mut dyn TerminalSurface, settings: &TerminalSettings) {
        surface.set_font(&settings.font);
        surface.set_colors(settings.fg_color, settings.bg_color);
        surface.set_cursor_blinks(settings.cursor_blink);
        surface.set_audible_bell(settings.bell);
        surface.set_scrollback_lines(settings.scrollback_lines);
        surface.set_scroll_on_keystroke(settings.scroll_on_keystroke);
        surface.set_scroll_on_output(settings.scroll_on_output);
        surface.set_emulation(&settings.emulation);
        surface.set_visible_bell(settings.visible_bell);
    }
}

/// Resolve every option from `file`, writing defaults into it for the ones
/// that are missing or invalid.
pub fn resolve(file: &mut RcFile) -> Resolved {
    let mut settings = TerminalSettings::default();
    let mut defaulted = Vec::new();

    for option in TerminalOption::ALL {
        match file.get(SECTION, option.key()) {
            Some(value) => {
                if let Err(e) = settings.set_from_str(option, value) {
                    warn!("Invalid value for terminal option {}: {}; using default", option, e);
                    defaulted.push(option);
                }
            }
            None => defaulted.push(option),
        }
    }

    for option in &defaulted {
        file.set(SECTION, option.key(), option.default_value());
    }

    Resolved {
        settings,
        defaulted,
    }
}
