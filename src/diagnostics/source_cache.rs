use std::{collections::HashMap, fs};

use crate::error::{ExtractError, Result};

/// Lines of source files, loaded on first use and kept for the whole run.
///
/// Entries are never replaced once stored. In degraded mode a file that
/// cannot be read yields no line instead of an error.
#[derive(Debug, Default)]
pub struct SourceCache {
    files: HashMap<String, Vec<String>>,
    degraded: bool,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that tolerates missing files, for tests and in-memory sources.
    pub fn degraded() -> Self {
        Self {
            files: HashMap::new(),
            degraded: true,
        }
    }

    /// Store text already read for `path`. A path already cached keeps its lines.
    pub fn insert(&mut self, path: &str, source: &str) {
        self.files
            .entry(path.to_string())
            .or_insert_with(|| split_lines(source));
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Line `line` (1-based) of `path`, reading the file if needed.
    ///
    /// Returns `None` past the end of the file, or for an unreadable file in
    /// degraded mode.
    pub fn line(&mut self, path: &str, line: usize) -> Result<Option<&str>> {
        if !self.files.contains_key(path) {
            match fs::read_to_string(path) {
                Ok(source) => self.insert(path, &source),
                Err(_) if self.degraded => return Ok(None),
                Err(error) => {
                    return Err(ExtractError::Read {
                        path: path.into(),
                        error,
                    });
                }
            }
        }

        Ok(self
            .files
            .get(path)
            .and_then(|lines| lines.get(line.checked_sub(1)?))
            .map(String::as_str))
    }
}

fn split_lines(source: &str) -> Vec<String> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
