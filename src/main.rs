//! linewise - head/tail windows, highlighted search and humanized sizes
//!
//! linewise provides:
//! - Head/tail windows of a file, in lines or bytes
//! - grep-like search with match highlighting and limits
//! - File type and size reporting
//! - Unified output format (text/jsonl/json)

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

mod cli;
mod logging;

fn main() -> ExitCode {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                // usage errors are fatal like any other
                _ => ExitCode::FAILURE,
            };
        }
    };
    logging::init(cli.verbose, cli.quiet);

    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
