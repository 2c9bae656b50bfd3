//! # camera-sort CLI
//!
//! Command-line interface for the camera sorter.
//!
//! ## Usage
//! ```bash
//! camera-sort ~/inbox ~/Photos --mode move
//! ```
//!
//! Files that cannot be sorted are reported but do not change the exit
//! status; an unreadable source folder exits with status 1.

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
