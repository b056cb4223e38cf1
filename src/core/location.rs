use std::fmt;

use crate::error::{ExtractError, Result};

/// A 1-based source position. `column` counts bytes, like Go's
/// `token.Position` and guru's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<tree_sitter::Point> for Location {
    fn from(point: tree_sitter::Point) -> Self {
        Self {
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A location inside a named file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub file_path: String,
    pub location: Location,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, location: Location) -> Self {
        Self {
            file_path: file_path.into(),
            location,
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.location)
    }
}

/// A call site submitted for extraction: the opening parenthesis of a call.
pub type RequestedPosition = SourceLocation;

/// Split a guru position (`/path/to/file.go:line:column`) into its parts.
pub fn parse_position(pos: &str) -> Result<RequestedPosition> {
    let chunks: Vec<&str> = pos.split(':').collect();
    let [file, line, column] = chunks.as_slice() else {
        return Err(ExtractError::InvalidPosition(pos.to_string()));
    };

    Ok(SourceLocation::new(
        *file,
        Location::new(parse_number(line)?, parse_number(column)?),
    ))
}

fn parse_number(value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|source| ExtractError::InvalidNumber {
            value: value.to_string(),
            source,
        })
}
