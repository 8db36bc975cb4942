//! Test doubles

use anyhow::Result;
use frotz_term::core::events::EventSender;
use frotz_term::terminal::{Color, FontDescription};
use frotz_term::{AppEvent, TerminalSurface};

/// Surface that records every call instead of driving a PTY
#[derive(Default)]
pub struct RecordingSurface {
    pub font: Option<FontDescription>,
    pub colors: Option<(Color, Color)>,
    pub cursor_blink: Option<bool>,
    pub audible_bell: Option<bool>,
    pub scrollback_lines: Option<usize>,
    pub scroll_on_keystroke: Option<bool>,
    pub scroll_on_output: Option<bool>,
    pub emulation: Option<String>,
    pub visible_bell: Option<bool>,
    pub forked: usize,
    pub fed: Vec<String>,
    pub input: Vec<u8>,
    pub shown: Vec<u8>,
    /// When set, feeding a command makes the "shell" exit with this code
    pub exit_after_feed: Option<(EventSender, u32)>,
}

impl RecordingSurface {
    pub fn exiting_after_feed(tx: EventSender, code: u32) -> Self {
        Self {
            exit_after_feed: Some((tx, code)),
            ..Default::default()
        }
    }
}

impl TerminalSurface for RecordingSurface {
    fn set_font(&mut self, font: &FontDescription) {
        self.font = Some(font.clone());
    }

    fn set_colors(&mut self, foreground: Color, background: Color) {
        self.colors = Some((foreground, background));
    }

    fn set_cursor_blinks(&mut self, blink: bool) {
        self.cursor_blink = Some(blink);
    }

    fn set_audible_bell(&mut self, bell: bool) {
        self.audible_bell = Some(bell);
    }

    fn set_scrollback_lines(&mut self, lines: usize) {
        self.scrollback_lines = Some(lines);
    }

    fn set_scroll_on_keystroke(&mut self, scroll: bool) {
        self.scroll_on_keystroke = Some(scroll);
    }

    fn set_scroll_on_output(&mut self, scroll: bool) {
        self.scroll_on_output = Some(scroll);
    }

    fn set_emulation(&mut self, emulation: &str) {
        self.emulation = Some(emulation.to_string());
    }

    fn set_visible_bell(&mut self, visible: bool) {
        self.visible_bell = Some(visible);
    }

    fn fork_command(&mut self) -> Result<()> {
        self.forked += 1;
        Ok(())
    }

    fn feed_child(&mut self, text: &str) -> Result<()> {
        self.fed.push(text.to_string());
        if let Some((tx, code)) = &self.exit_after_feed {
            tx.send(AppEvent::ChildExited(Some(*code)))?;
        }
        Ok(())
    }

    fn send_input(&mut self, data: &[u8]) -> Result<()> {
        self.input.extend_from_slice(data);
        Ok(())
    }

    fn display_output(&mut self, data: &[u8]) -> Result<usize> {
        self.shown.extend_from_slice(data);
        Ok(0)
    }

    fn flash(&mut self, _on: bool) -> Result<()> {
        Ok(())
    }

    fn resize(&mut self, _rows: u16, _cols: u16) -> Result<()> {
        Ok(())
    }

    fn scrollback(&self) -> Vec<String> {
        Vec::new()
    }

    fn is_running(&self) -> bool {
        self.forked > 0
    }
}
