//! Drives extraction over every requested file.
//!
//! Files are read and parsed in parallel. Matching then runs file by file in
//! path order, so diagnostics and catalog order never depend on scheduling.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use rayon::prelude::*;

use crate::core::catalog::{Catalog, Entry};
use crate::core::comments::CommentAssociator;
use crate::core::extract::CallMatcher;
use crate::core::index::PositionIndex;
use crate::core::parser::{ParsedFile, parse_go_file, parse_go_source};
use crate::core::{Location, RequestedPosition};
use crate::diagnostics::Reporter;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct Extractor {
    requests: BTreeMap<String, BTreeSet<Location>>,
    associator: CommentAssociator,
}

impl Extractor {
    pub fn new(associator: CommentAssociator) -> Self {
        Self {
            requests: BTreeMap::new(),
            associator,
        }
    }

    /// Request a call-site position. Repeated positions are recorded once.
    pub fn add(&mut self, position: RequestedPosition) {
        self.requests
            .entry(position.file_path)
            .or_default()
            .insert(position.location);
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.requests.keys().map(String::as_str)
    }

    /// Number of distinct requested positions.
    pub fn len(&self) -> usize {
        self.requests.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Resolve the positions requested for an already parsed file.
    pub fn extract_file<W: Write>(
        &self,
        file: &ParsedFile,
        reporter: &mut Reporter<W>,
    ) -> Result<Vec<Entry>> {
        let Some(locations) = self.requests.get(&file.path) else {
            return Ok(Vec::new());
        };
        let index = PositionIndex::new(locations.iter().copied());
        CallMatcher::new(file, index, &self.associator, reporter).run()
    }

    /// Read, parse and match every requested file.
    pub fn extract<W: Write>(&self, reporter: &mut Reporter<W>) -> Result<Catalog> {
        let parsed = self
            .requests
            .par_iter()
            .map(|(path, _)| parse_go_file(path))
            .collect::<Result<Vec<_>>>()?;
        self.build_catalog(parsed, reporter)
    }

    /// Like [`Extractor::extract`], with file contents supplied by the caller.
    ///
    /// A requested file missing from `sources` is read from disk.
    pub fn extract_sources<W: Write>(
        &self,
        mut sources: BTreeMap<String, String>,
        reporter: &mut Reporter<W>,
    ) -> Result<Catalog> {
        let sources: Vec<(&String, Option<String>)> = self
            .requests
            .keys()
            .map(|path| (path, sources.remove(path)))
            .collect();
        let parsed = sources
            .into_par_iter()
            .map(|(path, source)| match source {
                Some(source) => parse_go_source(path, source),
                None => parse_go_file(path),
            })
            .collect::<Result<Vec<_>>>()?;
        self.build_catalog(parsed, reporter)
    }

    fn build_catalog<W: Write>(
        &self,
        parsed: Vec<ParsedFile>,
        reporter: &mut Reporter<W>,
    ) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        for file in parsed {
            reporter.cache_mut().insert(&file.path, &file.source);
            let entries = self.extract_file(&file, reporter)?;
            catalog.insert_file(file.path.clone(), entries);
        }
        Ok(catalog)
    }
}
