//! Single-pass matcher resolving requested positions against a file's calls.
//!
//! Every `call_expression` is visited once, in document order. A call whose
//! opening parenthesis sits on a pending position is inspected: the comment
//! block above it may mark it ignored, otherwise its first argument is
//! classified and decoded. Calls are descended into whether they match or
//! not, so `A(B("x"))` resolves positions on both `A` and `B`.
//!
//! After the walk, positions that are still pending become not found.

use std::io::Write;

use tree_sitter::Node;

use crate::core::catalog::Entry;
use crate::core::comments::{Association, CommentAssociator, FileComments};
use crate::core::extract::argument::{Argument, Resolution, first_argument};
use crate::core::index::{MatchState, PositionIndex};
use crate::core::parser::ParsedFile;
use crate::core::{Location, SourceLocation};
use crate::diagnostics::Reporter;
use crate::error::Result;
use crate::issues::{Diagnostic, DiagnosticKind};

pub struct CallMatcher<'a, W: Write> {
    file: &'a ParsedFile,
    comments: FileComments,
    associator: &'a CommentAssociator,
    index: PositionIndex,
    reporter: &'a mut Reporter<W>,
    entries: Vec<Entry>,
}

impl<'a, W: Write> CallMatcher<'a, W> {
    pub fn new(
        file: &'a ParsedFile,
        index: PositionIndex,
        associator: &'a CommentAssociator,
        reporter: &'a mut Reporter<W>,
    ) -> Self {
        let comments = if associator.is_enabled() {
            FileComments::collect(file)
        } else {
            FileComments::default()
        };
        Self {
            file,
            comments,
            associator,
            index,
            reporter,
            entries: Vec::new(),
        }
    }

    /// Walk the file and return one entry per requested position.
    pub fn run(mut self) -> Result<Vec<Entry>> {
        if !self.index.is_empty() {
            let mut cursor = self.file.root().walk();
            loop {
                let node = cursor.node();
                if node.kind() == "call_expression" {
                    self.visit_call(node)?;
                }
                if cursor.goto_first_child() {
                    continue;
                }
                loop {
                    if cursor.goto_next_sibling() {
                        break;
                    }
                    if !cursor.goto_parent() {
                        return Ok(self.finish());
                    }
                }
            }
        }
        Ok(self.finish())
    }

    fn visit_call(&mut self, call: Node<'_>) -> Result<()> {
        let Some(arguments) = call.child_by_field_name("arguments") else {
            return Ok(());
        };
        let lparen = Location::from(arguments.start_position());
        if !self.index.is_pending(lparen) {
            return Ok(());
        }
        let position = SourceLocation::new(self.file.path.clone(), lparen);
        let first = first_argument(arguments);

        let call_line = call.start_position().row + 1;
        let comment = match self.associator.associate(&self.comments, call_line) {
            Association::Ignored => {
                let at = self.file.location(first.unwrap_or(call));
                self.reporter.report(&Diagnostic::new(
                    DiagnosticKind::Ignored {
                        marker: self.associator.ignore_marker().to_string(),
                    },
                    at,
                ))?;
                self.index.resolve(lparen, MatchState::Ignored);
                self.entries.push(Entry::ignored(position));
                return Ok(());
            }
            Association::Comment(lines) => Some(lines),
            Association::None => None,
        };

        let Some(first) = first else {
            // Left pending: becomes not found once the walk is over.
            return self.reporter.report(&Diagnostic::new(
                DiagnosticKind::NoArgument,
                self.file.location(call),
            ));
        };

        match Argument::classify(first, self.file).resolve()? {
            Resolution::Text(text) => {
                self.index.resolve(lparen, MatchState::Found);
                self.entries.push(Entry::found(position, text, comment));
            }
            Resolution::Diagnostic(diagnostic) => self.reporter.report(&diagnostic)?,
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<Entry> {
        for location in self.index.finish() {
            self.entries.push(Entry::not_found(SourceLocation::new(
                self.file.path.clone(),
                location,
            )));
        }
        self.entries
    }
}
