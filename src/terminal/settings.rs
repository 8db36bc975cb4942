//! Terminal appearance settings
//!
//! The fixed set of options stored in `terminalrc`, their typed values and
//! defaults.

use std::fmt;
use thiserror::Error;

/// Default font description
pub const DEFAULT_FONT: &str = "Monospace 8";

/// Default foreground color
pub const DEFAULT_FG_COLOR: &str = "#000000";

/// Default background color
pub const DEFAULT_BG_COLOR: &str = "#FFFFFF";

/// Default scrollback buffer size in lines
pub const DEFAULT_SCROLLBACK_LINES: usize = 1000;

/// Default emulation (also exported to the shell as `TERM`)
pub const DEFAULT_EMULATION: &str = "xterm";

/// Why a stored option value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("expected a boolean, got {0:?}")]
    InvalidBool(String),
    #[error("expected a non-negative integer, got {0:?}")]
    InvalidInteger(String),
    #[error("expected a #RGB or #RRGGBB color, got {0:?}")]
    InvalidColor(String),
    #[error("expected a font description, got an empty value")]
    EmptyFont,
    #[error("expected an emulation name, got an empty value")]
    EmptyEmulation,
}

/// One of the options understood in the `terminal` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalOption {
    Font,
    FgColor,
    BgColor,
    CursorBlink,
    Bell,
    ScrollbackLines,
    ScrollOnKeystroke,
    ScrollOnOutput,
    Emulation,
    VisibleBell,
}

impl TerminalOption {
    /// Every option, in the order they are written to disk
    pub const ALL: [TerminalOption; 10] = [
        TerminalOption::Font,
        TerminalOption::FgColor,
        TerminalOption::BgColor,
        TerminalOption::CursorBlink,
        TerminalOption::Bell,
        TerminalOption::ScrollbackLines,
        TerminalOption::ScrollOnKeystroke,
        TerminalOption::ScrollOnOutput,
        TerminalOption::Emulation,
        TerminalOption::VisibleBell,
    ];

    /// Key used in the configuration file
    pub fn key(&self) -> &'static str {
        match self {
            TerminalOption::Font => "font",
            TerminalOption::FgColor => "fg_color",
            TerminalOption::BgColor => "bg_color",
            TerminalOption::CursorBlink => "cursor_blink",
            TerminalOption::Bell => "bell",
            TerminalOption::ScrollbackLines => "scrollback_lines",
            TerminalOption::ScrollOnKeystroke => "scroll_on_keystroke",
            TerminalOption::ScrollOnOutput => "scroll_on_output",
            TerminalOption::Emulation => "emulation",
            TerminalOption::VisibleBell => "visible_bell",
        }
    }

    /// Default value, as it is written to the file
    pub fn default_value(&self) -> String {
        let defaults = TerminalSettings::default();
        defaults.value_string(*self)
    }
}

impl fmt::Display for TerminalOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A font family with an optional point size, e.g. `Monospace 8`
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescription {
    pub family: String,
    pub size: Option<f32>,
}

impl FontDescription {
    /// Parse a `"<family> [size]"` description. The last word is taken as the
    /// size when it is a positive number.
    pub fn parse(value: &str) -> Result<Self, OptionError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(OptionError::EmptyFont);
        }

        if let Some((family, last)) = value.rsplit_once(char::is_whitespace) {
            if let Ok(size) = last.parse::<f32>() {
                if size > 0.0 && size.is_finite() {
                    return Ok(Self {
                        family: family.trim_end().to_string(),
                        size: Some(size),
                    });
                }
            }
        }

        Ok(Self {
            family: value.to_string(),
            size: None,
        })
    }
}

impl fmt::Display for FontDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some(size) => write!(f, "{} {}", self.family, size),
            None => f.write_str(&self.family),
        }
    }
}

/// An RGB color parsed from `#RGB` or `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
    };

    /// Parse a hex color specification
    pub fn parse(value: &str) -> Result<Self, OptionError> {
        let invalid = || OptionError::InvalidColor(value.to_string());
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|d| d * 0x11);
                Ok(Self {
                    r: digit(0).map_err(|_| invalid())?,
                    g: digit(1).map_err(|_| invalid())?,
                    b: digit(2).map_err(|_| invalid())?,
                })
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                Ok(Self {
                    r: pair(0).map_err(|_| invalid())?,
                    g: pair(2).map_err(|_| invalid())?,
                    b: pair(4).map_err(|_| invalid())?,
                })
            }
            _ => Err(invalid()),
        }
    }

    /// `#rrggbb` form, as understood by xterm color OSC sequences
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a boolean the way INI files usually spell them
pub fn parse_bool(value: &str) -> Result<bool, OptionError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(OptionError::InvalidBool(value.to_string())),
    }
}

/// Parse a non-negative line count
pub fn parse_line_count(value: &str) -> Result<usize, OptionError> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    trimmed
        .parse::<usize>()
        .map_err(|_| OptionError::InvalidInteger(value.to_string()))
}

/// Fully resolved terminal settings
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalSettings {
    pub font: FontDescription,
    pub fg_color: Color,
    pub bg_color: Color,
    pub cursor_blink: bool,
    pub bell: bool,
    pub scrollback_lines: usize,
    pub scroll_on_keystroke: bool,
    pub scroll_on_output: bool,
    pub emulation: String,
    pub visible_bell: bool,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            font: FontDescription {
                family: "Monospace".to_string(),
                size: Some(8.0),
            },
            fg_color: Color::BLACK,
            bg_color: Color::WHITE,
            cursor_blink: false,
            bell: false,
            scrollback_lines: DEFAULT_SCROLLBACK_LINES,
            scroll_on_keystroke: false,
            scroll_on_output: false,
            emulation: DEFAULT_EMULATION.to_string(),
            visible_bell: false,
        }
    }
}

impl TerminalSettings {
    /// Parse `value` into the slot for `option`, leaving the current value
    /// untouched on error.
    pub fn set_from_str(&mut self, option: TerminalOption, value: &str) -> Result<(), OptionError> {
        match option {
            TerminalOption::Font => self.font = FontDescription::parse(value)?,
            TerminalOption::FgColor => self.fg_color = Color::parse(value)?,
            TerminalOption::BgColor => self.bg_color = Color::parse(value)?,
            TerminalOption::CursorBlink => self.cursor_blink = parse_bool(value)?,
            TerminalOption::Bell => self.bell = parse_bool(value)?,
            TerminalOption::ScrollbackLines => self.scrollback_lines = parse_line_count(value)?,
            TerminalOption::ScrollOnKeystroke => self.scroll_on_keystroke = parse_bool(value)?,
            TerminalOption::ScrollOnOutput => self.scroll_on_output = parse_bool(value)?,
            TerminalOption::Emulation => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(OptionError::EmptyEmulation);
                }
                self.emulation = value.to_string();
            }
            TerminalOption::VisibleBell => self.visible_bell = parse_bool(value)?,
        }
        Ok(())
    }

    /// Render the value for `option` in file form
    pub fn value_string(&self, option: TerminalOption) -> String {
        match option {
            TerminalOption::Font => self.font.to_string(),
            TerminalOption::FgColor => color_string(self.fg_color, DEFAULT_FG_COLOR, Color::BLACK),
            TerminalOption::BgColor => color_string(self.bg_color, DEFAULT_BG_COLOR, Color::WHITE),
            TerminalOption::CursorBlink => self.cursor_blink.to_string(),
            TerminalOption::Bell => self.bell.to_string(),
            TerminalOption::ScrollbackLines => self.scrollback_lines.to_string(),
            TerminalOption::ScrollOnKeystroke => self.scroll_on_keystroke.to_string(),
            TerminalOption::ScrollOnOutput => self.scroll_on_output.to_string(),
            TerminalOption::Emulation => self.emulation.clone(),
            TerminalOption::VisibleBell => self.visible_bell.to_string(),
        }
    }
}

// Keep the documented spelling for the defaults; anything else in #RRGGBB.
fn color_string(color: Color, default_text: &str, default: Color) -> String {
    if color == default {
        default_text.to_string()
    } else {
        color.to_hex().to_ascii_uppercase()
    }
}
