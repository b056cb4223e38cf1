use std::fs;

use tree_sitter::{Node, Parser, Tree};

use crate::core::{Location, SourceLocation};
use crate::error::{ExtractError, Result};

/// A Go source file parsed once, together with its text.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: String,
    pub source: String,
    pub tree: Tree,
}

impl ParsedFile {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text of a node in this file.
    pub fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }

    pub fn location(&self, node: Node<'_>) -> SourceLocation {
        SourceLocation::new(self.path.clone(), Location::from(node.start_position()))
    }
}

/// Read and parse a Go file from disk.
pub fn parse_go_file(path: &str) -> Result<ParsedFile> {
    let source = fs::read_to_string(path).map_err(|error| ExtractError::Read {
        path: path.into(),
        error,
    })?;
    parse_go_source(path, source)
}

/// Parse Go source code.
///
/// Unlike the compiler, tree-sitter recovers from syntax errors. A tree that
/// needed recovery is rejected so that no call site is matched against a
/// guessed structure.
pub fn parse_go_source(path: &str, source: String) -> Result<ParsedFile> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;

    let Some(tree) = parser.parse(&source, None) else {
        return Err(ExtractError::Syntax(SourceLocation::new(
            path,
            Location::new(1, 1),
        )));
    };

    let root = tree.root_node();
    if root.has_error() {
        let location = Location::from(first_error(root).start_position());
        return Err(ExtractError::Syntax(SourceLocation::new(path, location)));
    }

    Ok(ParsedFile {
        path: path.to_string(),
        source,
        tree,
    })
}

fn first_error(node: Node<'_>) -> Node<'_> {
    if node.is_error() || node.is_missing() {
        return node;
    }
    let mut cursor = node.walk();
    let child = node
        .children(&mut cursor)
        .find(|child| child.has_error() || child.is_missing());
    match child {
        Some(child) => first_error(child),
        None => node,
    }
}
