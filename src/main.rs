//! # media-tidy CLI
//!
//! Command-line interface for media-tidy.
//!
//! ## Usage
//! ```bash
//! media-tidy dedupe ~/Desktop/Phone ~/Photos/Albums/2022
//! media-tidy organize ~/Photos/Unsorted ~/Photos/Organized --granularity day
//! ```

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
