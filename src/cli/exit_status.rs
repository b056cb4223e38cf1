use std::process::ExitCode;

/// Exit status of a gurutext run.
///
/// Diagnostics about individual call sites do not change the status, only
/// errors that abort the run do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The catalog was written, possibly with diagnostics.
    Success,
    /// The run was aborted (bad position, syntax error, guru failure...).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(1),
        }
    }
}
