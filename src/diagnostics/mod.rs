//! Rendering of diagnostics with source context.
//!
//! Warnings are printed as
//!
//! ```text
//! WARNING: argument not a string literal (identifier)
//! main.go:4:4:
//! 	A(foo)
//! 	  ^
//! ```
//!
//! The caret line copies tabs from the source line so that it stays aligned
//! whatever the tab width of the terminal.

pub mod source_cache;

use std::io::Write;

use colored::Colorize;
use unicode_width::UnicodeWidthChar;

pub use source_cache::SourceCache;

use crate::error::{ExtractError, Result};
use crate::issues::{Diagnostic, Severity};

/// Writes diagnostics to a stream, in the order they are reported.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    writer: W,
    cache: SourceCache,
    color: bool,
    reported: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(writer: W, cache: SourceCache) -> Self {
        Self {
            writer,
            cache,
            color: false,
            reported: 0,
        }
    }

    /// Colour the severity label and caret.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn cache_mut(&mut self) -> &mut SourceCache {
        &mut self.cache
    }

    /// Number of diagnostics reported so far.
    pub fn reported(&self) -> usize {
        self.reported
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn report(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.reported += 1;
        let severity = diagnostic.severity();
        let label = format!("{}:", severity);
        let label = match (self.color, severity) {
            (false, _) => label,
            (true, Severity::Warning) => label.bold().yellow().to_string(),
            (true, Severity::Note) => label.bold().cyan().to_string(),
        };

        let location = &diagnostic.location;
        writeln!(self.writer, "{} {}", label, diagnostic.kind).map_err(ExtractError::Diagnostics)?;
        writeln!(self.writer, "{}:", location).map_err(ExtractError::Diagnostics)?;

        if severity == Severity::Note {
            return Ok(());
        }

        let Some(line) = self.cache.line(location.file_path(), location.line())? else {
            return Ok(());
        };
        let padding = caret_padding(line, location.column());
        let caret = if self.color {
            "^".yellow().to_string()
        } else {
            "^".to_string()
        };
        writeln!(self.writer, "{}", line).map_err(ExtractError::Diagnostics)?;
        writeln!(self.writer, "{}{}", padding, caret).map_err(ExtractError::Diagnostics)?;
        Ok(())
    }
}

/// Whitespace that lines a caret up under byte column `column` (1-based).
fn caret_padding(line: &str, column: usize) -> String {
    let mut end = column.saturating_sub(1).min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }

    let mut padding = String::with_capacity(end);
    for c in line[..end].chars() {
        if c == '\t' {
            padding.push('\t');
        } else {
            let width = c.width().unwrap_or(0);
            padding.extend(std::iter::repeat_n(' ', width));
        }
    }
    padding
}
