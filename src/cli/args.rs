//! CLI argument definitions using clap.
//!
//! ```text
//! gurutext [OPTIONS] <OFFSET>...
//! ```
//!
//! Each offset is a guru query position (`file.go:#byteOffset`) pointing at a
//! translation function. Its callers become the call sites to extract.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

#[derive(Debug, Default, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Position of a translation function, as `file.go:#offset`
    #[arg(value_name = "OFFSET")]
    pub offsets: Vec<String>,

    /// Package patterns for guru's -scope argument
    #[arg(long, value_name = "PATTERNS")]
    pub scope: Option<String>,

    /// Exclude files matching the given regex
    #[arg(long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Sort messages alphabetically
    #[arg(long)]
    pub sort: bool,

    /// Extract comments that start with KEYWORD
    #[arg(long, value_name = "KEYWORD")]
    pub comment: Option<String>,

    /// Ignore calls whose preceding comment contains this text [default: GURUTEXT_IGNORE]
    #[arg(long, value_name = "TEXT")]
    pub ignore: Option<String>,

    /// Read guru's callers JSON from FILE instead of running guru (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    pub callers: Option<PathBuf>,

    /// Configuration file (default: nearest .gurutextrc.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Arguments {
    /// Check that call sites can be obtained, otherwise print help and return None.
    pub fn with_input_or_help(self) -> Option<Self> {
        if self.offsets.is_empty() && self.callers.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::args::*;

    #[test]
    fn test_parse_options() {
        let args = Arguments::try_parse_from([
            "gurutext",
            "--scope",
            "example.com/app/...",
            "--exclude",
            "_test\\.go$",
            "--sort",
            "--comment",
            "TRANSLATORS:",
            "i18n/i18n.go:#120",
            "i18n/i18n.go:#250",
        ])
        .unwrap();
        assert_eq!(args.offsets, vec!["i18n/i18n.go:#120", "i18n/i18n.go:#250"]);
        assert_eq!(args.scope.as_deref(), Some("example.com/app/..."));
        assert!(args.sort);
        assert_eq!(args.comment.as_deref(), Some("TRANSLATORS:"));
        assert_eq!(args.ignore, None);
        assert!(!args.verbose);
    }

    #[test]
    fn test_callers_file_without_offsets() {
        let args = Arguments::try_parse_from(["gurutext", "--callers", "-", "-v"]).unwrap();
        assert!(args.offsets.is_empty());
        assert_eq!(args.callers, Some(PathBuf::from("-")));
        assert!(args.verbose);
        assert!(args.with_input_or_help().is_some());
    }

    #[test]
    fn test_verify_cli() {
        Arguments::command().debug_assert();
    }
}
