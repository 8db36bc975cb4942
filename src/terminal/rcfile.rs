//! Section-scoped key-value file (`terminalrc`)
//!
//! A small reader/writer for the INI dialect the settings file uses:
//! `[section]` headers, `key = value` or `key: value` pairs, `#`/`;` comment
//! lines and ` ;` inline comments. A leading byte order mark is ignored.
//! Keys are case-insensitive and stored lowercased. Sections and keys keep
//! their file order so rewriting a file only changes what was set.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

/// Parsed contents of a key-value file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RcFile {
    sections: Vec<Section>,
    /// Malformed lines dropped while parsing
    skipped: usize,
}

impl RcFile {
    /// Create an empty file
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse file contents. Malformed lines are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut file = Self::new();
        let mut current: Option<usize> = None;

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                match rest.strip_suffix(']') {
                    Some(name) => {
                        let name = name.trim();
                        current = Some(file.section_index_or_insert(name));
                    }
                    None => {
                        warn!("Ignoring malformed section header on line {}: {:?}", lineno + 1, raw);
                        file.skipped += 1;
                    }
                }
                continue;
            }

            let Some(section) = current else {
                warn!("Ignoring line {} outside of any section: {:?}", lineno + 1, raw);
                file.skipped += 1;
                continue;
            };

            let Some(split) = line.find(['=', ':']) else {
                warn!("Ignoring line {} without a value: {:?}", lineno + 1, raw);
                file.skipped += 1;
                continue;
            };

            let key = line[..split].trim().to_ascii_lowercase();
            let value = strip_inline_comment(&line[split + 1..]).trim().to_string();
            if key.is_empty() {
                warn!("Ignoring line {} with an empty key: {:?}", lineno + 1, raw);
                file.skipped += 1;
                continue;
            }
            file.sections[section].set(key, value);
        }

        file
    }

    /// Read and parse `path`. A missing file yields an empty `RcFile`.
    pub fn read(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", path)),
        }
    }

    /// Write the file to `path`, creating parent directories if needed
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }
        std::fs::write(path, self.to_string())
            .with_context(|| format!("Failed to write {:?}", path))?;
        Ok(())
    }

    /// Whether every non-comment line was understood. Rewriting a file that
    /// is not lossless would drop the lines that were skipped.
    pub fn is_lossless(&self) -> bool {
        self.skipped == 0
    }

    #[cfg(test)]
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s.name == section)
    }

    /// Look up `key` in `section`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` in `section`, adding the section when absent
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let index = self.section_index_or_insert(section);
        self.sections[index].set(key.to_ascii_lowercase(), value.into());
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

/// Cut a ` ;` comment off the end of a value
fn strip_inline_comment(value: &str) -> &str {
    let mut prev_space = false;
    for (i, c) in value.char_indices() {
        if c == ';' && prev_space {
            return &value[..i];
        }
        prev_space = c.is_whitespace();
    }
    value
}

impl Section {
    fn set(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl fmt::Display for RcFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{} = {}", key, value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
