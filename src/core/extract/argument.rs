use std::fmt;

use tree_sitter::Node;

use crate::core::literal::{ConcatError, Concatenation, Operand, StringLiteral, decode};
use crate::core::parser::ParsedFile;
use crate::core::SourceLocation;
use crate::error::ExtractError;
use crate::issues::{Diagnostic, DiagnosticKind};

const STRING_LITERAL_KINDS: &[&str] = &["interpreted_string_literal", "raw_string_literal"];

/// Expression kinds that name a value instead of spelling it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `A(hello)`
    Identifier,
    /// `A(pkg.Hello)`
    Selector,
    /// `A(hello())`
    Call,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Identifier => write!(f, "identifier"),
            ReferenceKind::Selector => write!(f, "selector expression"),
            ReferenceKind::Call => write!(f, "call expression"),
        }
    }
}

/// The first argument of a matched call, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Literal(StringLiteral),
    Concatenation(Concatenation),
    NonLiteralReference {
        kind: ReferenceKind,
        location: SourceLocation,
    },
    Unsupported {
        kind: String,
        location: SourceLocation,
    },
}

/// Outcome of decoding an argument that did not break an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Text(String),
    Diagnostic(Diagnostic),
}

impl Argument {
    pub fn classify(node: Node<'_>, file: &ParsedFile) -> Self {
        let location = file.location(node);
        match node.kind() {
            kind if STRING_LITERAL_KINDS.contains(&kind) => Argument::Literal(StringLiteral {
                token: file.text(node).to_string(),
                location,
            }),
            "binary_expression" => Argument::Concatenation(concatenation(node, file)),
            "identifier" => Argument::NonLiteralReference {
                kind: ReferenceKind::Identifier,
                location,
            },
            "selector_expression" => Argument::NonLiteralReference {
                kind: ReferenceKind::Selector,
                location,
            },
            "call_expression" => Argument::NonLiteralReference {
                kind: ReferenceKind::Call,
                location,
            },
            other => Argument::Unsupported {
                kind: describe_kind(other),
                location,
            },
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            Argument::Literal(literal) => &literal.location,
            Argument::Concatenation(concatenation) => concatenation.left.location(),
            Argument::NonLiteralReference { location, .. } => location,
            Argument::Unsupported { location, .. } => location,
        }
    }

    /// Decode the argument.
    ///
    /// Anything that cannot produce a message comes back as a diagnostic;
    /// only a concatenation that breaks its shape invariant is an error.
    pub fn resolve(&self) -> Result<Resolution, ExtractError> {
        let malformed = |location: &SourceLocation, error| {
            Resolution::Diagnostic(Diagnostic::new(
                DiagnosticKind::MalformedLiteral { error },
                location.clone(),
            ))
        };

        match self {
            Argument::Literal(literal) => Ok(match decode(&literal.token) {
                Ok(text) => Resolution::Text(text),
                Err(error) => malformed(&literal.location, error),
            }),
            Argument::Concatenation(concatenation) => match concatenation.fold() {
                Ok(text) => Ok(Resolution::Text(text)),
                Err(ConcatError::Malformed { location, error }) => Ok(malformed(&location, error)),
                Err(ConcatError::Internal(err)) => Err(err),
            },
            Argument::NonLiteralReference { kind, location } => Ok(Resolution::Diagnostic(
                Diagnostic::new(DiagnosticKind::NotALiteral { kind: *kind }, location.clone()),
            )),
            Argument::Unsupported { kind, location } => Ok(Resolution::Diagnostic(
                Diagnostic::new(
                    DiagnosticKind::UnhandledExpression { kind: kind.clone() },
                    location.clone(),
                ),
            )),
        }
    }
}

fn concatenation(node: Node<'_>, file: &ParsedFile) -> Concatenation {
    let operator = node.child_by_field_name("operator");
    Concatenation {
        operator: operator.map(|op| file.text(op).to_string()).unwrap_or_default(),
        location: file.location(operator.unwrap_or(node)),
        left: operand(node.child_by_field_name("left"), node, file),
        right: operand(node.child_by_field_name("right"), node, file),
    }
}

fn operand(node: Option<Node<'_>>, parent: Node<'_>, file: &ParsedFile) -> Operand {
    let Some(node) = node else {
        return Operand::Other {
            kind: "missing operand".to_string(),
            location: file.location(parent),
        };
    };
    match node.kind() {
        kind if STRING_LITERAL_KINDS.contains(&kind) => Operand::Literal(StringLiteral {
            token: file.text(node).to_string(),
            location: file.location(node),
        }),
        "binary_expression" => Operand::Concatenation(Box::new(concatenation(node, file))),
        other => Operand::Other {
            kind: describe_kind(other),
            location: file.location(node),
        },
    }
}

/// `parenthesized_expression` -> `parenthesized expression`
fn describe_kind(kind: &str) -> String {
    kind.replace('_', " ")
}

/// First argument of an `argument_list`, skipping comments.
pub fn first_argument<'t>(arguments: Node<'t>) -> Option<Node<'t>> {
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment")
}
