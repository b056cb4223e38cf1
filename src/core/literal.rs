//! Go string literal decoding and `msgid` quoting.
//!
//! Literals arrive as raw source tokens (quotes included). Interpreted
//! literals (`"..."`) have their escape sequences processed, raw literals
//! (`` `...` ``) are taken verbatim. Chains of `+` between literals fold
//! into a single value.

use thiserror::Error;

use crate::core::SourceLocation;
use crate::error::ExtractError;

/// Why a literal token could not be turned into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("not a string literal: {0}")]
    NotAString(String),
    #[error("unknown escape sequence \\{0}")]
    InvalidEscape(String),
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}

/// Decode a string literal token into its value.
pub fn decode(token: &str) -> Result<String, LiteralError> {
    if let Some(body) = strip_delimiters(token, '"') {
        decode_interpreted(body)
    } else if let Some(body) = strip_delimiters(token, '`') {
        // Go discards carriage returns inside raw literals.
        Ok(body.replace('\r', ""))
    } else {
        Err(LiteralError::NotAString(token.to_string()))
    }
}

fn strip_delimiters(token: &str, delimiter: char) -> Option<&str> {
    token
        .strip_prefix(delimiter)
        .and_then(|rest| rest.strip_suffix(delimiter))
}

fn decode_interpreted(body: &str) -> Result<String, LiteralError> {
    // \x and octal escapes produce single bytes, so decode into bytes first.
    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        let Some(escape) = chars.next() else {
            return Err(LiteralError::InvalidEscape(String::new()));
        };
        let simple = match escape {
            'a' => Some(0x07),
            'b' => Some(0x08),
            'f' => Some(0x0c),
            'n' => Some(b'\n'),
            'r' => Some(b'\r'),
            't' => Some(b'\t'),
            'v' => Some(0x0b),
            '\\' => Some(b'\\'),
            '"' => Some(b'"'),
            _ => None,
        };
        if let Some(byte) = simple {
            out.push(byte);
            continue;
        }

        match escape {
            '0'..='7' => {
                let digits: String = std::iter::once(escape).chain(chars.by_ref().take(2)).collect();
                let value = u32::from_str_radix(&digits, 8)
                    .ok()
                    .filter(|v| digits.len() == 3 && *v <= 0xff)
                    .ok_or_else(|| LiteralError::InvalidEscape(digits.clone()))?;
                out.push(value as u8);
            }
            'x' => {
                let value = take_hex(&mut chars, escape, 2)?;
                out.push(value as u8);
            }
            'u' | 'U' => {
                let width = if escape == 'u' { 4 } else { 8 };
                let value = take_hex(&mut chars, escape, width)?;
                let c = char::from_u32(value)
                    .ok_or_else(|| LiteralError::InvalidEscape(format!("{escape}{value:x}")))?;
                let mut buf = [0; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            other => return Err(LiteralError::InvalidEscape(other.to_string())),
        }
    }

    String::from_utf8(out).map_err(|_| LiteralError::InvalidUtf8)
}

fn take_hex(chars: &mut std::str::Chars<'_>, escape: char, width: usize) -> Result<u32, LiteralError> {
    let digits: String = chars.by_ref().take(width).collect();
    if digits.len() != width {
        return Err(LiteralError::InvalidEscape(format!("{escape}{digits}")));
    }
    u32::from_str_radix(&digits, 16).map_err(|_| LiteralError::InvalidEscape(format!("{escape}{digits}")))
}

/// Quote a value for use as a `msgid`.
///
/// The result never contains a bare newline.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A string literal token and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub token: String,
    pub location: SourceLocation,
}

/// One side of a concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(StringLiteral),
    Concatenation(Box<Concatenation>),
    /// Anything else: an identifier, a call, a number...
    Other { kind: String, location: SourceLocation },
}

/// A binary expression in argument position, e.g. `"two" + " " + "three"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concatenation {
    pub operator: String,
    /// Position of the operator.
    pub location: SourceLocation,
    pub left: Operand,
    pub right: Operand,
}

#[derive(Debug)]
pub enum ConcatError {
    /// A literal inside the chain could not be decoded.
    Malformed {
        location: SourceLocation,
        error: LiteralError,
    },
    Internal(ExtractError),
}

impl From<ExtractError> for ConcatError {
    fn from(err: ExtractError) -> Self {
        ConcatError::Internal(err)
    }
}

impl Concatenation {
    /// Fold the chain into a single value, left to right.
    pub fn fold(&self) -> Result<String, ConcatError> {
        if self.operator != "+" {
            return Err(ExtractError::NotAnAddition {
                location: self.location.clone(),
                operator: self.operator.clone(),
            }
            .into());
        }
        let mut value = self.left.value()?;
        value.push_str(&self.right.value()?);
        Ok(value)
    }
}

impl Operand {
    /// Where the operand starts.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Operand::Literal(literal) => &literal.location,
            Operand::Concatenation(inner) => inner.left.location(),
            Operand::Other { location, .. } => location,
        }
    }

    fn value(&self) -> Result<String, ConcatError> {
        match self {
            Operand::Literal(literal) => {
                decode(&literal.token).map_err(|error| ConcatError::Malformed {
                    location: literal.location.clone(),
                    error,
                })
            }
            Operand::Concatenation(inner) => inner.fold(),
            Operand::Other { kind, location } => Err(ExtractError::UnhandledOperand {
                location: location.clone(),
                kind: kind.clone(),
            }
            .into()),
        }
    }
}
