//! soq CLI - Stack Overflow answers in the terminal
//!
//! Thin entry point: runs the CLI and turns failures into a single
//! `error: <message>` line plus a categorized exit code.

use colored::Colorize;
use soq_cli::error::exit_code_from_error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match soq_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
