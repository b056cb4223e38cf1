//! gurutext - gettext template extraction for Go
//!
//! gurutext takes the call sites of translation functions, as reported by
//! `guru callers`, decodes the string literal passed to each call and writes
//! the messages as a gettext template (`.pot`).
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, guru runner, run loop)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (parse, index, match, collect)
//! - `diagnostics`: Rendering of warnings with source context
//! - `error`: Fatal error types
//! - `issues`: Recoverable diagnostic definitions

pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod issues;
