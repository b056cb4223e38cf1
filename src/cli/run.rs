//! Main entry point for a gurutext run.
//!
//! Call sites are collected (from guru, or a callers file), filtered by the
//! exclusion pattern and handed to the [`Extractor`]. The catalog is only
//! written once every file has been extracted, so a fatal error never leaves
//! a partial catalog behind.

use std::{
    env,
    io::{self, IsTerminal, Write},
};

use anyhow::{Context, Result};
use regex::Regex;

use super::args::Arguments;
use super::guru::{CallLocation, read_callers, run_guru};
use crate::config::{Config, load_config, load_config_file};
use crate::core::{CommentAssociator, Extractor, MatchState, parse_position};
use crate::diagnostics::{Reporter, SourceCache};

/// Options after merging the command line over the configuration file.
#[derive(Debug, Clone)]
pub struct Options {
    pub comment_prefix: String,
    pub ignore_marker: String,
    pub exclude: Option<Regex>,
    pub sort: bool,
    pub scope: Option<String>,
}

impl Options {
    pub fn merge(args: &Arguments, config: Config) -> Result<Self> {
        let config = Config {
            comment: args.comment.clone().unwrap_or(config.comment),
            ignore: args.ignore.clone().unwrap_or(config.ignore),
            exclude: args.exclude.clone().or(config.exclude),
            sort: args.sort || config.sort,
            scope: args.scope.clone().or(config.scope),
        };
        Ok(Self {
            exclude: config.exclude_regex()?,
            comment_prefix: config.comment,
            ignore_marker: config.ignore,
            sort: config.sort,
            scope: config.scope,
        })
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub call_sites: usize,
    pub excluded: usize,
    pub found: usize,
    pub not_found: usize,
    pub ignored: usize,
    pub diagnostics: usize,
}

pub fn run(args: Arguments) -> Result<RunSummary> {
    let verbose = args.verbose;
    let config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            load_config(&cwd)?
        }
    };
    if verbose {
        match &config.path {
            Some(path) => eprintln!("Note: Using configuration from {}", path.display()),
            None => eprintln!("Note: No .gurutextrc.json found, using default configuration"),
        }
    }
    let options = Options::merge(&args, config.config)?;

    let callers = collect_callers(&args, &options, verbose)?;
    let mut summary = RunSummary::default();
    let mut extractor = Extractor::new(CommentAssociator::new(
        options.comment_prefix.clone(),
        options.ignore_marker.clone(),
    ));
    for caller in &callers {
        let position = parse_position(&caller.pos)?;
        if options
            .exclude
            .as_ref()
            .is_some_and(|exclude| exclude.is_match(position.file_path()))
        {
            if verbose {
                eprintln!("Note: Excluding {}", position);
            }
            summary.excluded += 1;
            continue;
        }
        extractor.add(position);
    }
    summary.files = extractor.files().count();
    summary.call_sites = extractor.len();

    let stderr = io::stderr();
    let color = stderr.is_terminal() && env::var_os("NO_COLOR").is_none();
    let mut reporter = Reporter::new(stderr.lock(), SourceCache::new()).with_color(color);
    let catalog = extractor.extract(&mut reporter)?;
    summary.diagnostics = reporter.reported();

    for entry in catalog.all() {
        match entry.state {
            MatchState::Found => summary.found += 1,
            MatchState::NotFound => summary.not_found += 1,
            MatchState::Ignored => summary.ignored += 1,
            MatchState::Pending => {}
        }
    }

    let mut stdout = io::stdout().lock();
    catalog
        .write_to(&mut stdout, options.sort)
        .context("Failed to write catalog")?;
    stdout.flush().context("Failed to write catalog")?;

    Ok(summary)
}

fn collect_callers(args: &Arguments, options: &Options, verbose: bool) -> Result<Vec<CallLocation>> {
    let mut callers = Vec::new();
    if let Some(path) = &args.callers {
        callers.extend(read_callers(path)?);
    }
    for offset in &args.offsets {
        if verbose {
            eprintln!("Note: Running guru callers {}", offset);
        }
        callers.extend(run_guru(offset, options.scope.as_deref())?);
    }
    if verbose {
        eprintln!("Note: Found {} call site(s)", callers.len());
    }
    Ok(callers)
}
