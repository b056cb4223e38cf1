//! Recoverable problems found while matching call sites.
//!
//! A diagnostic never stops extraction: the call site it concerns simply
//! produces no message, and processing continues with the next one.

use std::fmt;

use crate::core::SourceLocation;
use crate::core::extract::ReferenceKind;
use crate::core::literal::LiteralError;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Note => write!(f, "NOTE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `A()`
    NoArgument,
    /// `A(hello)`, `A(msgs.Hello)`, `A(hello())`
    NotALiteral { kind: ReferenceKind },
    /// Any other expression shape, e.g. `A(("hello"))` or `A(42)`.
    UnhandledExpression { kind: String },
    /// A string literal the decoder rejected.
    MalformedLiteral { error: LiteralError },
    /// The call is preceded by a comment holding the ignore marker.
    Ignored { marker: String },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::Ignored { .. } => Severity::Note,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::NoArgument => write!(f, "no argument in function call"),
            DiagnosticKind::NotALiteral { kind } => {
                write!(f, "argument not a string literal ({})", kind)
            }
            DiagnosticKind::UnhandledExpression { kind } => {
                write!(f, "unhandled argument expression ({})", kind)
            }
            DiagnosticKind::MalformedLiteral { error } => {
                write!(f, "malformed string literal: {}", error)
            }
            DiagnosticKind::Ignored { marker } => {
                write!(f, "call ignored, preceding comment contains {}", marker)
            }
        }
    }
}

/// A problem with one call site and the exact position it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}
