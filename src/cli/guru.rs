//! Call sites from guru's `callers` query.
//!
//! `guru -json callers file.go:#offset` prints the places that call the
//! function at `offset`:
//!
//! ```json
//! [{"pos": "/src/app/main.go:12:3", "desc": "static function call", "caller": "main.main"}]
//! ```

use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::Command,
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub const GURU_BIN: &str = "guru";

/// One call site reported by guru.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallLocation {
    /// `path:line:column` of the call's opening parenthesis.
    pub pos: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub caller: String,
}

/// guru prints an array, a concatenation of query results may hold several.
#[derive(Deserialize)]
#[serde(untagged)]
enum CallersDocument {
    Many(Vec<CallLocation>),
    One(CallLocation),
}

/// Arguments passed to guru for one query.
pub fn guru_args(offset: &str, scope: Option<&str>) -> Vec<String> {
    let mut args = vec!["-json".to_string()];
    if let Some(scope) = scope.filter(|scope| !scope.is_empty()) {
        args.push("-scope".to_string());
        args.push(scope.to_string());
    }
    args.push("callers".to_string());
    args.push(offset.to_string());
    args
}

/// Run guru for `offset` and decode the call sites it reports.
pub fn run_guru(offset: &str, scope: Option<&str>) -> Result<Vec<CallLocation>> {
    let output = Command::new(GURU_BIN)
        .args(guru_args(offset, scope))
        .output()
        .with_context(|| format!("Failed to run {}", GURU_BIN))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{}", trim_trailing_newline(&stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_callers(&stdout).with_context(|| format!("Invalid guru output for {}", offset))
}

/// Read guru's JSON output from a file, or from stdin for `-`.
pub fn read_callers(path: &Path) -> Result<Vec<CallLocation>> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read callers from stdin")?;
        content
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read callers file: {:?}", path))?
    };
    parse_callers(&content).with_context(|| format!("Invalid callers file: {:?}", path))
}

pub fn parse_callers(json: &str) -> Result<Vec<CallLocation>> {
    let mut callers = Vec::new();
    for document in serde_json::Deserializer::from_str(json).into_iter::<CallersDocument>() {
        match document? {
            CallersDocument::Many(many) => callers.extend(many),
            CallersDocument::One(one) => callers.push(one),
        }
    }
    Ok(callers)
}

/// Drop a single trailing newline, as tools usually end their messages with one.
pub fn trim_trailing_newline(message: &str) -> &str {
    message.strip_suffix('\n').unwrap_or(message)
}
