use anyhow::Result;

pub mod args;
mod exit_status;
pub mod guru;
mod report;
pub mod run;

pub use args::Arguments;
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose;

    let Some(args) = args.with_input_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let summary = run::run(args)?;
    if verbose {
        report::print_summary(&summary);
    }

    Ok(ExitStatus::Success)
}
