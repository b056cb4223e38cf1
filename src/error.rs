//! Fatal errors raised while extracting messages.
//!
//! Anything in here aborts the run. Problems that only affect a single call
//! site are [`Diagnostic`](crate::issues::Diagnostic)s instead and never
//! surface as an `ExtractError`.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::core::SourceLocation;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// A caller position that is not `path:line:column`.
    #[error("pos not in /path/to/file.go:line:column format: {0}")]
    InvalidPosition(String),

    #[error("{value}: invalid number in position")]
    InvalidNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{}: {error}", path.display())]
    Read { path: PathBuf, error: io::Error },

    #[error("{0}: syntax error")]
    Syntax(SourceLocation),

    #[error("failed to load the Go grammar")]
    Language(#[from] tree_sitter::LanguageError),

    /// A concatenation candidate joined by something other than `+`.
    #[error("{location}: not an add operation ({operator})")]
    NotAnAddition {
        location: SourceLocation,
        operator: String,
    },

    /// A concatenation operand that is neither a literal nor a nested `+`.
    #[error("{location}: unhandled expression type {kind}")]
    UnhandledOperand {
        location: SourceLocation,
        kind: String,
    },

    #[error("failed to write diagnostics: {0}")]
    Diagnostics(io::Error),
}

impl ExtractError {
    /// True for errors that mean the extractor itself broke an invariant,
    /// as opposed to bad input or I/O.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ExtractError::NotAnAddition { .. } | ExtractError::UnhandledOperand { .. }
        )
    }
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
