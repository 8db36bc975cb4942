//! Terminal surface capability
//!
//! What the rest of the app needs from a terminal: appearance setters, a
//! shell to type into, and somewhere to show the shell's output.

use super::settings::{Color, FontDescription};
use anyhow::Result;

/// A terminal that hosts an interactive shell.
///
/// Setters are expected to be called before [`TerminalSurface::fork_command`];
/// the PTY surface only picks up changes to the emulation at fork time.
pub trait TerminalSurface {
    fn set_font(&mut self, font: &FontDescription);
    fn set_colors(&mut self, foreground: Color, background: Color);
    fn set_cursor_blinks(&mut self, blink: bool);
    fn set_audible_bell(&mut self, bell: bool);
    fn set_scrollback_lines(&mut self, lines: usize);
    fn set_scroll_on_keystroke(&mut self, scroll: bool);
    fn set_scroll_on_output(&mut self, scroll: bool);
    fn set_emulation(&mut self, emulation: &str);
    fn set_visible_bell(&mut self, visible: bool);

    /// Spawn the interactive shell
    fn fork_command(&mut self) -> Result<()>;

    /// Send text to the shell as if it had been typed
    fn feed_child(&mut self, text: &str) -> Result<()>;

    /// Forward raw keystrokes from the user
    fn send_input(&mut self, data: &[u8]) -> Result<()>;

    /// Show output read from the shell. Returns the number of bells rung.
    fn display_output(&mut self, data: &[u8]) -> Result<usize>;

    /// Turn the visual bell flash on or off
    fn flash(&mut self, on: bool) -> Result<()>;

    fn resize(&mut self, rows: u16, cols: u16) -> Result<()>;

    /// Most recent lines of output, oldest first
    fn scrollback(&self) -> Vec<String>;

    fn is_running(&self) -> bool;
}
