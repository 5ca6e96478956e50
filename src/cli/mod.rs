pub mod args;
pub mod commands;

use std::io::{self, Write};

use scc_finder::scc::common::SettingsError;
use scc_finder::scc::parse::ParseGraphError;
use thiserror::Error;

pub use args::USAGE;
use args::{parse_args, ArgsError, Command};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid graph: {0}")]
    Parse(#[from] ParseGraphError),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Runs the command named by `args`. `Ok(false)` means the command ran but
/// found a problem.
pub fn run<I: IntoIterator<Item = String>>(args: I) -> Result<bool, CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match parse_args(args)? {
        Command::Find { path, recursive, cycles_only } => {
            let input = commands::read_input(path.as_deref())?;
            commands::find(&input, recursive, cycles_only, &mut out)?;
            Ok(true)
        }
        Command::Check(settings) => commands::check(&settings, &mut out),
        Command::Help => {
            writeln!(out, "{USAGE}")?;
            Ok(true)
        }
    }
}
