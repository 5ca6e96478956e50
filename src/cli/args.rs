use std::path::PathBuf;
use std::str::FromStr;

use scc_finder::scc::common::Settings;
use thiserror::Error;

pub const USAGE: &str = "\
usage:
    scc_finder find [FILE|-] [--recursive] [--cycles]
    scc_finder check [--graphs N] [--nodes N] [--degree F] [--seed S] [--self-loops]";

#[derive(Debug, PartialEq)]
pub enum Command {
    Find {
        path: Option<PathBuf>,
        recursive: bool,
        cycles_only: bool,
    },
    Check(Settings),
    Help,
}

#[derive(Error, Debug, PartialEq)]
pub enum ArgsError {
    #[error("missing command, expected `find` or `check`")]
    MissingCommand,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("option `{0}` needs a value")]
    MissingValue(String),
    #[error("invalid value `{value}` for `{option}`")]
    InvalidValue { option: String, value: String },
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

fn value<T: FromStr>(option: &str, args: &mut impl Iterator<Item = String>) -> Result<T, ArgsError> {
    let value = args.next().ok_or_else(|| ArgsError::MissingValue(option.to_string()))?;
    value.parse().map_err(|_| ArgsError::InvalidValue { option: option.to_string(), value })
}

/// Parses the arguments that follow the program name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, ArgsError> {
    let mut args = args.into_iter();
    let command = args.next().ok_or(ArgsError::MissingCommand)?;

    match command.as_str() {
        "find" => {
            let mut path = None;
            let mut recursive = false;
            let mut cycles_only = false;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--recursive" => recursive = true,
                    "--cycles" => cycles_only = true,
                    s if s.starts_with("--") => return Err(ArgsError::UnknownOption(arg)),
                    _ if path.is_none() => path = Some(PathBuf::from(arg)),
                    _ => return Err(ArgsError::UnexpectedArgument(arg)),
                }
            }
            Ok(Command::Find { path, recursive, cycles_only })
        }
        "check" => {
            let mut settings = Settings::standard();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--graphs" => settings.n_graphs = value(&arg, &mut args)?,
                    "--nodes" => settings.n_nodes = value(&arg, &mut args)?,
                    "--degree" => settings.mean_out_degree = value(&arg, &mut args)?,
                    "--seed" => settings.seed = value(&arg, &mut args)?,
                    "--self-loops" => settings.allow_self_loops = true,
                    s if s.starts_with("--") => return Err(ArgsError::UnknownOption(arg)),
                    _ => return Err(ArgsError::UnexpectedArgument(arg)),
                }
            }
            Ok(Command::Check(settings))
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        _ => Err(ArgsError::UnknownCommand(command)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Command, ArgsError> {
        parse_args(s.split_whitespace().map(String::from))
    }

    #[test]
    fn test_find() {
        assert_eq!(
            parse("find graph.txt --cycles"),
            Ok(Command::Find { path: Some(PathBuf::from("graph.txt")), recursive: false, cycles_only: true })
        );
        assert_eq!(parse("find --recursive"), Ok(Command::Find { path: None, recursive: true, cycles_only: false }));
        assert_eq!(parse("find a b"), Err(ArgsError::UnexpectedArgument("b".to_string())));
    }

    #[test]
    fn test_check() {
        let expected = Settings { n_graphs: 10, n_nodes: 30, mean_out_degree: 2.5, seed: 4, allow_self_loops: true };
        assert_eq!(parse("check --graphs 10 --nodes 30 --degree 2.5 --seed 4 --self-loops"), Ok(Command::Check(expected)));
        assert_eq!(parse("check"), Ok(Command::Check(Settings::standard())));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(""), Err(ArgsError::MissingCommand));
        assert_eq!(parse("sort"), Err(ArgsError::UnknownCommand("sort".to_string())));
        assert_eq!(parse("check --nodes"), Err(ArgsError::MissingValue("--nodes".to_string())));
        assert_eq!(
            parse("check --nodes many"),
            Err(ArgsError::InvalidValue { option: "--nodes".to_string(), value: "many".to_string() })
        );
        assert_eq!(parse("check --fast"), Err(ArgsError::UnknownOption("--fast".to_string())));
    }
}
