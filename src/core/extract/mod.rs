//! Matching call sites and decoding their first argument.

pub mod argument;
pub mod matcher;

pub use argument::{Argument, ReferenceKind, Resolution, first_argument};
pub use matcher::CallMatcher;
