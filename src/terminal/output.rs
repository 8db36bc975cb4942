//! Shell output filtering
//!
//! Runs PTY output through a `vte` parser on its way to the host terminal so
//! that bells can be told apart from OSC terminators, and keeps a bounded
//! plain-text scrollback of recent lines.

use std::collections::VecDeque;
use vte::{Parser, Perform};

const BEL: u8 = 0x07;

/// Result of filtering one chunk of output
#[derive(Debug, Default, PartialEq)]
pub struct Filtered {
    /// Bytes to forward to the host terminal
    pub bytes: Vec<u8>,
    /// Number of bells rung in this chunk
    pub bells: usize,
}

/// Collects per-byte parser events
struct Tracker {
    bell: bool,
    lines: VecDeque<String>,
    current: String,
    carriage_return: bool,
    limit: usize,
}

impl Tracker {
    fn push_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.carriage_return = false;
        if self.limit == 0 {
            return;
        }
        if self.lines.len() == self.limit {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }
}

impl Perform for Tracker {
    fn print(&mut self, c: char) {
        if self.carriage_return {
            self.current.clear();
            self.carriage_return = false;
        }
        self.current.push(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            BEL => self.bell = true,
            b'\n' => self.push_line(),
            b'\r' => self.carriage_return = true,
            0x08 => {
                self.current.pop();
            }
            _ => {}
        }
    }
}

/// Bell-aware pass-through filter with a line scrollback
pub struct OutputFilter {
    parser: Parser,
    tracker: Tracker,
    audible_bell: bool,
}

impl OutputFilter {
    pub fn new(scrollback_lines: usize, audible_bell: bool) -> Self {
        Self {
            parser: Parser::new(),
            tracker: Tracker {
                bell: false,
                lines: VecDeque::new(),
                current: String::new(),
                carriage_return: false,
                limit: scrollback_lines,
            },
            audible_bell,
        }
    }

    pub fn set_audible_bell(&mut self, audible: bool) {
        self.audible_bell = audible;
    }

    /// Change the scrollback limit, dropping the oldest lines if needed
    pub fn set_scrollback_lines(&mut self, lines: usize) {
        self.tracker.limit = lines;
        while self.tracker.lines.len() > lines {
            self.tracker.lines.pop_front();
        }
    }

    /// Filter a chunk of PTY output. Bare BEL controls are dropped unless the
    /// audible bell is enabled; everything else passes through unchanged.
    pub fn filter(&mut self, data: &[u8]) -> Filtered {
        let mut out = Filtered {
            bytes: Vec::with_capacity(data.len()),
            bells: 0,
        };

        for &byte in data {
            self.tracker.bell = false;
            self.parser.advance(&mut self.tracker, byte);
            if self.tracker.bell {
                out.bells += 1;
                if !self.audible_bell {
                    continue;
                }
            }
            out.bytes.push(byte);
        }

        out
    }

    /// Completed lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.tracker.lines.iter().cloned().collect()
    }
}
