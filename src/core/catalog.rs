//! Catalog of extracted messages and its `.pot` rendering.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Write};

use crate::core::index::MatchState;
use crate::core::literal::quote;
use crate::core::SourceLocation;

const TRANSLATOR_COMMENT: &str = "#.";

/// The outcome for one requested position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub location: SourceLocation,
    /// Decoded text, present only for [`MatchState::Found`].
    pub text: Option<String>,
    pub state: MatchState,
    pub comment: Option<Vec<String>>,
}

impl Entry {
    pub fn found(location: SourceLocation, text: String, comment: Option<Vec<String>>) -> Self {
        Self {
            location,
            text: Some(text),
            state: MatchState::Found,
            comment,
        }
    }

    pub fn not_found(location: SourceLocation) -> Self {
        Self {
            location,
            text: None,
            state: MatchState::NotFound,
            comment: None,
        }
    }

    pub fn ignored(location: SourceLocation) -> Self {
        Self {
            location,
            text: None,
            state: MatchState::Ignored,
            comment: None,
        }
    }

    /// The quoted `msgid` payload, for found entries.
    pub fn msgid(&self) -> Option<String> {
        self.text.as_deref().map(quote)
    }

    /// Render the entry as a gettext template block.
    ///
    /// ```text
    /// #. TRANSLATORS: greeting
    /// #: main.go:4:3
    /// msgid "hello"
    /// msgstr ""
    /// ```
    pub fn as_gettext(&self) -> Option<String> {
        let msgid = self.msgid()?;
        let mut out = String::new();

        if let Some(comment) = &self.comment {
            let mut lines = comment.as_slice();
            while let Some((last, rest)) = lines.split_last() {
                if !last.is_empty() {
                    break;
                }
                lines = rest;
            }
            for line in lines {
                if line.is_empty() {
                    let _ = writeln!(out, "{}", TRANSLATOR_COMMENT);
                } else {
                    let _ = writeln!(out, "{} {}", TRANSLATOR_COMMENT, line);
                }
            }
        }
        let _ = writeln!(out, "#: {}", self.location);
        let _ = writeln!(out, "msgid {}", msgid);
        let _ = writeln!(out, "msgstr \"\"");
        Some(out)
    }
}

/// Entries grouped by file, each file in discovery order.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    files: BTreeMap<String, Vec<Entry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the entries of one file. A file seen again keeps its first entries.
    pub fn insert_file(&mut self, file_path: impl Into<String>, entries: Vec<Entry>) {
        self.files.entry(file_path.into()).or_insert(entries);
    }

    pub fn entries(&self, file_path: &str) -> &[Entry] {
        self.files.get(file_path).map_or(&[], Vec::as_slice)
    }

    /// Every entry regardless of state, file by file.
    pub fn all(&self) -> impl Iterator<Item = &Entry> {
        self.files.values().flatten()
    }

    /// Found entries, per file in discovery order.
    pub fn found(&self) -> impl Iterator<Item = &Entry> {
        self.all().filter(|entry| entry.state == MatchState::Found)
    }

    /// Found entries ordered by their quoted `msgid`. Ties keep discovery order.
    pub fn sorted(&self) -> Vec<&Entry> {
        let mut keyed: Vec<(String, &Entry)> = self
            .found()
            .filter_map(|entry| Some((entry.msgid()?, entry)))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, entry)| entry).collect()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, sort: bool) -> io::Result<()> {
        let entries: Vec<&Entry> = if sort {
            self.sorted()
        } else {
            self.found().collect()
        };
        for entry in entries {
            if let Some(block) = entry.as_gettext() {
                writeln!(writer, "{}", block)?;
            }
        }
        Ok(())
    }

    pub fn to_gettext(&self, sort: bool) -> String {
        let mut out = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_to(&mut out, sort);
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
