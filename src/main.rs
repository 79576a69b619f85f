//! todo - manage your todo.txt files from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todotxt::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
