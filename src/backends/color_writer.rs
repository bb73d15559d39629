//! Colorizing output transform
//!
//! Wraps a byte sink. Every write collapses runs of tabs into one space,
//! looks for a level keyword (`DEBUG`, `INFO`, `WARN`, `ERROR`, `FATAL`) at
//! the start of the text or right after a space or `[`, and wraps the whole
//! write in that level's ANSI color. Text without a level keyword passes
//! through with only the tab normalization applied.

use crate::core::{LogLevel, LoggerError, Result, WriteStage};
use std::io::{self, Write};

pub const RESET: &str = "\x1b[0m";

/// Writer that colors whole lines by the level they mention
///
/// # Example
///
/// ```
/// use service_kit::backends::ColorWriter;
/// use std::io::Write;
///
/// let mut writer = ColorWriter::new(Vec::new());
/// writer.write_all(b"12:00:00\tINFO\tready").unwrap();
///
/// let out = String::from_utf8(writer.into_inner()).unwrap();
/// assert!(out.starts_with("\x1b[32m"));
/// assert!(out.contains("12:00:00 INFO ready"));
/// ```
#[derive(Debug)]
pub struct ColorWriter<W> {
    inner: W,
}

impl<W: Write> ColorWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write `buf` with stage-labelled errors; returns `buf.len()` on success
    pub fn write_colored(&mut self, buf: &[u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let normalized = collapse_tabs(buf);
        match detect_level(&normalized) {
            Some(level) => {
                let prefix = color_prefix(level);
                self.inner
                    .write_all(prefix.as_bytes())
                    .map_err(|e| LoggerError::write_stage(WriteStage::Prefix, e))?;
                self.inner
                    .write_all(&normalized)
                    .map_err(|e| LoggerError::write_stage(WriteStage::Content, e))?;
                self.inner
                    .write_all(RESET.as_bytes())
                    .map_err(|e| LoggerError::write_stage(WriteStage::Suffix, e))?;
            }
            None => {
                self.inner
                    .write_all(&normalized)
                    .map_err(|e| LoggerError::write_stage(WriteStage::Content, e))?;
            }
        }
        Ok(buf.len())
    }
}

impl<W: Write> Write for ColorWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_colored(buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// ANSI escape that switches to `level`'s color
pub fn color_prefix(level: LogLevel) -> String {
    format!("\x1b[{}m", level.color_code().to_fg_str())
}

/// Replace every run of tabs with a single space
pub fn collapse_tabs(buf: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len());
    let mut in_tabs = false;
    for &byte in buf {
        if byte == b'\t' {
            if !in_tabs {
                out.push(b' ');
                in_tabs = true;
            }
        } else {
            out.push(byte);
            in_tabs = false;
        }
    }
    out
}

/// First level keyword found at a word start, scanning left to right
pub fn detect_level(text: &[u8]) -> Option<LogLevel> {
    (0..text.len())
        .filter(|&pos| pos == 0 || matches!(text[pos - 1], b' ' | b'['))
        .find_map(|pos| {
            LogLevel::ALL
                .into_iter()
                .find(|level| text[pos..].starts_with(level.to_str().as_bytes()))
        })
}
