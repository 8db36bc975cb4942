//! PTY-backed terminal surface
//!
//! Spawns the user's shell in a pseudo-terminal and relays its output to the
//! host terminal. Appearance settings the host terminal understands (colors,
//! font, cursor blink) are sent to it as xterm control sequences.

use crate::core::events::{AppEvent, EventSender};
use crate::terminal::{Color, FontDescription, OutputFilter, TerminalSurface};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use portable_pty::{native_pty_system, ChildKiller, CommandBuilder, MasterPty, PtySize};
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Settings pushed onto the surface before the shell is forked
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub font: Option<FontDescription>,
    pub colors: Option<(Color, Color)>,
    pub cursor_blink: bool,
    pub audible_bell: bool,
    pub scrollback_lines: usize,
    /// Recorded only; the host terminal owns the viewport
    pub scroll_on_keystroke: bool,
    /// Recorded only; the host terminal owns the viewport
    pub scroll_on_output: bool,
    /// Exported to the shell as `TERM`
    pub emulation: String,
    pub visible_bell: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            font: None,
            colors: None,
            cursor_blink: false,
            audible_bell: true,
            scrollback_lines: crate::terminal::settings::DEFAULT_SCROLLBACK_LINES,
            scroll_on_keystroke: false,
            scroll_on_output: false,
            emulation: crate::terminal::settings::DEFAULT_EMULATION.to_string(),
            visible_bell: false,
        }
    }
}

impl SurfaceOptions {
    /// Control sequences that configure the host terminal
    pub fn prologue(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if let Some(font) = &self.font {
            out.extend_from_slice(format!("\x1b]50;{}\x07", font).as_bytes());
        }
        if let Some((fg, bg)) = self.colors {
            out.extend_from_slice(format!("\x1b]10;{}\x07", fg.to_hex()).as_bytes());
            out.extend_from_slice(format!("\x1b]11;{}\x07", bg.to_hex()).as_bytes());
        }
        let blink = if self.cursor_blink { 'h' } else { 'l' };
        out.extend_from_slice(format!("\x1b[?12{}", blink).as_bytes());
        out
    }

    /// Control sequences that undo the prologue
    pub fn epilogue(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.colors.is_some() {
            out.extend_from_slice(b"\x1b]110\x07\x1b]111\x07");
        }
        if self.visible_bell {
            out.extend_from_slice(FLASH_OFF);
        }
        out
    }
}

const FLASH_ON: &[u8] = b"\x1b[?5h";
const FLASH_OFF: &[u8] = b"\x1b[?5l";

/// Terminal surface running the shell in a PTY
pub struct PtySurface {
    /// PTY master handle
    master: Option<Box<dyn MasterPty + Send>>,
    /// Writer to PTY
    writer: Option<Box<dyn Write + Send>>,
    /// Handle for killing the shell on drop
    killer: Option<Box<dyn ChildKiller + Send + Sync>>,
    /// Event sender
    event_tx: EventSender,
    /// Where shell output is shown
    host: Box<dyn Write + Send>,
    filter: OutputFilter,
    options: SurfaceOptions,
    size: PtySize,
    /// Whether the shell is running
    running: Arc<Mutex<bool>>,
}

impl PtySurface {
    /// Create a surface that renders to `host`
    pub fn new(event_tx: EventSender, host: Box<dyn Write + Send>, rows: u16, cols: u16) -> Self {
        let options = SurfaceOptions::default();
        Self {
            master: None,
            writer: None,
            killer: None,
            event_tx,
            host,
            filter: OutputFilter::new(options.scrollback_lines, options.audible_bell),
            options,
            size: PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            },
            running: Arc::new(Mutex::new(false)),
        }
    }

    /// Create a surface that renders to stdout, sized like the host terminal
    pub fn stdout(event_tx: EventSender) -> Self {
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        Self::new(event_tx, Box::new(std::io::stdout()), rows, cols)
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    fn write_host(&mut self, bytes: &[u8]) -> Result<()> {
        self.host
            .write_all(bytes)
            .and_then(|()| self.host.flush())
            .context("Failed to write to host terminal")
    }

    fn write_pty(&mut self, data: &[u8]) -> Result<()> {
        let writer = self.writer.as_mut().context("PTY not running")?;
        writer.write_all(data)?;
        writer.flush()?;
        Ok(())
    }

    /// Start background thread to read PTY output
    fn start_reader_thread(
        &self,
        mut reader: Box<dyn Read + Send>,
        mut child: Box<dyn portable_pty::Child + Send + Sync>,
    ) {
        let event_tx = self.event_tx.clone();
        let running = Arc::clone(&self.running);

        std::thread::spawn(move || {
            let mut buffer = [0u8; 4096];

            loop {
                match reader.read(&mut buffer) {
                    Ok(0) => {
                        // EOF - shell exited
                        debug!("PTY EOF");
                        break;
                    }
                    Ok(n) => {
                        if event_tx.send(AppEvent::PtyOutput(buffer[..n].to_vec())).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        if e.kind() != std::io::ErrorKind::Interrupted {
                            // EIO is how Linux reports a closed PTY
                            debug!("PTY read ended: {}", e);
                            break;
                        }
                    }
                }
            }

            let exit_code = match child.wait() {
                Ok(status) => {
                    info!("Shell exited with status: {:?}", status);
                    Some(status.exit_code())
                }
                Err(e) => {
                    error!("Failed to wait for shell: {}", e);
                    None
                }
            };

            *running.lock() = false;
            let _ = event_tx.send(AppEvent::ChildExited(exit_code));
        });
    }
}

impl TerminalSurface for PtySurface {
    fn set_font(&mut self, font: &FontDescription) {
        self.options.font = Some(font.clone());
    }

    fn set_colors(&mut self, foreground: Color, background: Color) {
        self.options.colors = Some((foreground, background));
    }

    fn set_cursor_blinks(&mut self, blink: bool) {
        self.options.cursor_blink = blink;
    }

    fn set_audible_bell(&mut self, bell: bool) {
        self.options.audible_bell = bell;
        self.filter.set_audible_bell(bell);
    }

    fn set_scrollback_lines(&mut self, lines: usize) {
        self.options.scrollback_lines = lines;
        self.filter.set_scrollback_lines(lines);
    }

    fn set_scroll_on_keystroke(&mut self, scroll: bool) {
        self.options.scroll_on_keystroke = scroll;
    }

    fn set_scroll_on_output(&mut self, scroll: bool) {
        self.options.scroll_on_output = scroll;
    }

    fn set_emulation(&mut self, emulation: &str) {
        self.options.emulation = emulation.to_string();
    }

    fn set_visible_bell(&mut self, visible: bool) {
        self.options.visible_bell = visible;
    }

    fn fork_command(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }

        let pty_system = native_pty_system();
        let pair = pty_system.openpty(self.size).context("Failed to create PTY")?;

        let mut cmd = CommandBuilder::new_default_prog();
        cmd.env("TERM", &self.options.emulation);
        if let Ok(cwd) = std::env::current_dir() {
            cmd.cwd(cwd);
        }

        debug!("Surface options: {:?}", self.options);
        let prologue = self.options.prologue();
        self.write_host(&prologue)?;

        info!("Starting shell with TERM={}", self.options.emulation);
        let child = pair
            .slave
            .spawn_command(cmd)
            .context("Failed to spawn shell")?;

        let writer = pair
            .master
            .take_writer()
            .context("Failed to get PTY writer")?;
        let reader = pair
            .master
            .try_clone_reader()
            .context("Failed to get PTY reader")?;

        self.killer = Some(child.clone_killer());
        self.master = Some(pair.master);
        self.writer = Some(writer);
        *self.running.lock() = true;

        self.start_reader_thread(reader, child);
        Ok(())
    }

    fn feed_child(&mut self, text: &str) -> Result<()> {
        self.write_pty(text.as_bytes())
    }

    fn send_input(&mut self, data: &[u8]) -> Result<()> {
        self.write_pty(data)
    }

    fn display_output(&mut self, data: &[u8]) -> Result<usize> {
        let filtered = self.filter.filter(data);
        self.write_host(&filtered.bytes)?;
        if self.options.visible_bell {
            Ok(filtered.bells)
        } else {
            Ok(0)
        }
    }

    fn flash(&mut self, on: bool) -> Result<()> {
        self.write_host(if on { FLASH_ON } else { FLASH_OFF })
    }

    fn resize(&mut self, rows: u16, cols: u16) -> Result<()> {
        self.size.rows = rows;
        self.size.cols = cols;
        if let Some(ref master) = self.master {
            master.resize(self.size).context("Failed to resize PTY")?;
        }
        Ok(())
    }

    fn scrollback(&self) -> Vec<String> {
        self.filter.lines()
    }

    fn is_running(&self) -> bool {
        *self.running.lock()
    }
}

impl Drop for PtySurface {
    fn drop(&mut self) {
        if self.is_running() {
            if let Some(killer) = self.killer.as_mut() {
                if let Err(e) = killer.kill() {
                    warn!("Failed to stop shell: {}", e);
                }
            }
        }
        if self.master.is_some() {
            let epilogue = self.options.epilogue();
            let _ = self.write_host(&epilogue);
        }
    }
}
