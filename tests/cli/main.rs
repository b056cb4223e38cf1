use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod config;
mod extract;

const BIN_NAME: &str = "gurutext";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Keeps configuration lookup inside the project.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write guru-style callers JSON for the given `path:line:column` positions.
    pub fn write_callers(&self, path: &str, positions: &[&str]) -> Result<()> {
        let callers: Vec<String> = positions
            .iter()
            .map(|pos| {
                format!(
                    r#"{{"pos": "{}", "desc": "static function call", "caller": "main.main"}}"#,
                    pos
                )
            })
            .collect();
        self.write_file(path, &format!("[{}]\n", callers.join(",\n")))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// Run with call sites read from `callers.json`.
    pub fn extract_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.args(["--callers", "callers.json"]);
        cmd
    }
}

pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
}

pub fn run(cmd: &mut Command) -> Result<RunOutput> {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output().context("Failed to run gurutext")?;
    Ok(RunOutput {
        stdout: String::from_utf8(stdout)?,
        stderr: String::from_utf8(stderr)?,
        code: status.code(),
    })
}
