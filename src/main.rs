mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match cli::run(std::env::args().skip(1)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            if let cli::CliError::Args(_) = e {
                eprintln!("{}", cli::USAGE);
            }
            ExitCode::from(2)
        }
    }
}
