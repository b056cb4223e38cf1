//! Extraction engine.
//!
//! Requested call-site positions go through four stages:
//!
//! 1. **Parse** (`parser`): each requested Go file is parsed once with tree-sitter.
//! 2. **Index** (`index`): positions are grouped per file by line and column.
//! 3. **Match** (`extract`, `comments`): calls at those positions have their
//!    first argument decoded (`literal`) and the comment block above them attached.
//! 4. **Collect** (`catalog`): entries are gathered per file and rendered as a
//!    gettext template.
//!
//! [`Extractor`] runs the whole pipeline.

pub mod catalog;
pub mod comments;
pub mod extract;
pub mod extractor;
pub mod index;
pub mod literal;
pub mod location;
pub mod parser;

pub use catalog::{Catalog, Entry};
pub use comments::{Association, CommentAssociator, FileComments};
pub use extractor::Extractor;
pub use index::{MatchState, PositionIndex};
pub use location::{Location, RequestedPosition, SourceLocation, parse_position};
pub use parser::{ParsedFile, parse_go_file, parse_go_source};
