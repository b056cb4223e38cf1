//! End-of-run summary, printed to stderr with `--verbose`.

use std::io::{self, Write};

use colored::Colorize;

use super::run::RunSummary;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print_summary(summary: &RunSummary) {
    print_summary_to(summary, &mut io::stderr().lock());
}

pub fn print_summary_to<W: Write>(summary: &RunSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} Extracted {} message(s) from {} file(s)",
        SUCCESS_MARK.green(),
        summary.found,
        summary.files,
    );
    let _ = writeln!(
        writer,
        "  {} call site(s): {} not found, {} ignored, {} excluded, {} diagnostic(s)",
        summary.call_sites,
        summary.not_found,
        summary.ignored,
        summary.excluded,
        summary.diagnostics,
    );
}
