//! # CLI Module
//!
//! Command-line interface for media-tidy.
//!
//! ## Usage
//! ```bash
//! # Recycle files in ~/Inbox that already exist somewhere in ~/Photos
//! media-tidy dedupe ~/Inbox ~/Photos
//!
//! # Sort a camera dump into ~/Sorted/YYYY/MM
//! media-tidy organize ~/Camera ~/Sorted --granularity month
//!
//! # Preview only
//! media-tidy organize ~/Camera ~/Sorted --dry-run
//!
//! # Plan as JSON
//! media-tidy dedupe ~/Inbox ~/Photos --output json
//! ```

mod dedupe;
mod organize;
mod prompt;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use media_tidy::core::organize::DateGranularity;
use media_tidy::core::scanner::DEFAULT_EXTENSIONS;
use media_tidy::error::{MediaTidyError, Result};
use media_tidy::events::{Event, HashEvent, HashProgress, ScanEvent};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// media-tidy - Tidy photo folders without fear
#[derive(Parser, Debug)]
#[command(name = "media-tidy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recycle files in FOLDER_A whose content also exists in FOLDER_B
    Dedupe {
        /// Folder to clean up
        folder_a: PathBuf,

        /// Folder holding the copies to keep
        folder_b: PathBuf,

        /// File extensions to consider (repeatable or comma separated)
        #[arg(long = "ext", value_name = "EXT", value_delimiter = ',', default_values_t = default_extensions())]
        extensions: Vec<String>,

        /// Follow symbolic links while scanning
        #[arg(long)]
        follow_symlinks: bool,

        /// Show what would happen and exit without asking
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Move top-level media from SOURCE into dated folders under OUTPUT
    Organize {
        /// Folder with the unsorted files
        source: PathBuf,

        /// Root of the dated folder tree
        output_dir: PathBuf,

        /// How deep the dated folders go
        #[arg(short, long, default_value = "day")]
        granularity: Granularity,

        /// File extensions to consider (repeatable or comma separated)
        #[arg(long = "ext", value_name = "EXT", value_delimiter = ',', default_values_t = default_extensions())]
        extensions: Vec<String>,

        /// Show what would happen and exit without asking
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Granularity {
    /// OUTPUT/YYYY
    Year,
    /// OUTPUT/YYYY/MM
    Month,
    /// OUTPUT/YYYY/MM/DD (default)
    Day,
}

impl From<Granularity> for DateGranularity {
    fn from(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Year => DateGranularity::Year,
            Granularity::Month => DateGranularity::Month,
            Granularity::Day => DateGranularity::Day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON plan for scripting (never changes anything)
    Json,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dedupe {
            folder_a,
            folder_b,
            extensions,
            follow_symlinks,
            dry_run,
            output,
            verbose,
        } => {
            media_tidy::init_tracing(verbose);
            check_extensions(&extensions)?;
            dedupe::run(dedupe::DedupeArgs {
                folder_a,
                folder_b,
                extensions,
                follow_symlinks,
                dry_run,
                output,
            })
        }
        Commands::Organize {
            source,
            output_dir,
            granularity,
            extensions,
            dry_run,
            output,
            verbose,
        } => {
            media_tidy::init_tracing(verbose);
            check_extensions(&extensions)?;
            organize::run(organize::OrganizeArgs {
                source,
                output_dir,
                granularity: granularity.into(),
                extensions,
                dry_run,
                output,
            })
        }
    }
}

/// Reject an extension list that would match nothing
fn check_extensions(extensions: &[String]) -> Result<()> {
    if extensions
        .iter()
        .all(|e| e.trim().trim_start_matches('.').is_empty())
    {
        return Err(MediaTidyError::Config(
            "at least one non-empty --ext is required".to_string(),
        ));
    }
    Ok(())
}

/// Turns scan and hash events into a progress bar on stderr.
///
/// When stderr is not a terminal the bar would stay hidden, so hashing
/// progress is printed as plain lines instead, one per whole percent.
struct ProgressReporter {
    enabled: bool,
    is_tty: bool,
    bar: Option<ProgressBar>,
    last_percent: Option<u32>,
}

impl ProgressReporter {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            is_tty: std::io::stderr().is_terminal(),
            bar: None,
            last_percent: None,
        }
    }

    fn handle(&mut self, event: &Event) {
        if !self.enabled {
            return;
        }

        match event {
            Event::Scan(ScanEvent::Started { root, exclude }) => {
                let message = match exclude {
                    Some(excluded) => format!(
                        "Scanning {} (excluding {})...",
                        display_path(root),
                        display_path(excluded)
                    ),
                    None => format!("Scanning {}...", display_path(root)),
                };
                eprintln!("{}", style(message).dim());
            }
            Event::Scan(ScanEvent::Error { path, message }) => {
                self.suspend(|| {
                    eprintln!(
                        "{} {}: {}",
                        style("!").yellow(),
                        display_path(path),
                        message
                    )
                });
            }
            Event::Hash(HashEvent::Started { total_files }) => {
                self.last_percent = None;
                if !self.is_tty {
                    return;
                }
                let pb = ProgressBar::new(*total_files as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} processed ({percent}%) {msg}",
                        )
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▓░"),
                );
                pb.set_message("Hashing files");
                self.bar = Some(pb);
            }
            Event::Hash(HashEvent::Progress(p)) => match self.bar {
                Some(ref pb) => pb.set_position(p.completed as u64),
                None => {
                    let percent = whole_percent(p);
                    if self.last_percent != Some(percent) {
                        self.last_percent = Some(percent);
                        eprintln!("{}", progress_line(p));
                    }
                }
            },
            Event::Hash(HashEvent::Error { path, message }) => {
                self.suspend(|| {
                    eprintln!(
                        "{} Could not hash {}: {}",
                        style("!").yellow(),
                        display_path(path),
                        message
                    )
                });
            }
            Event::Hash(HashEvent::Completed { .. }) => {
                if let Some(pb) = self.bar.take() {
                    pb.finish_and_clear();
                }
            }
            _ => {}
        }
    }

    fn suspend<F: FnOnce()>(&self, f: F) {
        match self.bar {
            Some(ref pb) => pb.suspend(f),
            None => f(),
        }
    }
}

/// Completion rounded down, so 100 only shows once everything is done
fn whole_percent(progress: &HashProgress) -> u32 {
    progress.percent().floor() as u32
}

fn progress_line(progress: &HashProgress) -> String {
    format!(
        "Hashing files: {}/{} processed ({}%)",
        progress.completed,
        progress.total,
        whole_percent(progress)
    )
}

/// Show paths under the home directory as `~/...`
fn display_path(path: &Path) -> String {
    let home = dirs::home_dir().unwrap_or_default();
    if !home.as_os_str().is_empty() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
