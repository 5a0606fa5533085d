//! `media-tidy dedupe`

use super::prompt::ask;
use super::{display_path, OutputFormat, ProgressReporter};
use console::{style, Term};
use media_tidy::core::dedupe::{DedupeConfig, DedupeExecutor, DedupePlan, DedupePlanner, SystemTrash};
use media_tidy::error::{MediaTidyError, Result};
use media_tidy::events::{ActionEvent, Event};
use std::io;
use std::path::PathBuf;

pub struct DedupeArgs {
    pub folder_a: PathBuf,
    pub folder_b: PathBuf,
    pub extensions: Vec<String>,
    pub follow_symlinks: bool,
    pub dry_run: bool,
    pub output: OutputFormat,
}

pub fn run(args: DedupeArgs) -> Result<()> {
    let term = Term::stdout();
    let pretty = args.output == OutputFormat::Pretty;

    let config = DedupeConfig {
        folder_a: args.folder_a,
        folder_b: args.folder_b,
        extensions: args.extensions,
        follow_symlinks: args.follow_symlinks,
    };

    let mut progress = ProgressReporter::new(pretty);
    let plan = DedupePlanner::create_plan(&config, |event| progress.handle(event))?;

    if !pretty {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    print_summary(&term, &plan);

    if plan.is_empty() {
        term.write_line("No duplicates found.").ok();
        return Ok(());
    }

    if args.dry_run {
        print_pairs(&term, &plan);
        term.write_line(&format!(
            "{}",
            style("Dry run: no files were moved to the recycle bin.").dim()
        ))
        .ok();
        return Ok(());
    }

    let confirmed = confirm_delete(&term, &plan).map_err(MediaTidyError::Prompt)?;

    if !confirmed {
        term.write_line("Deletion cancelled.").ok();
        return Ok(());
    }

    let result = DedupeExecutor::execute(&plan, &SystemTrash, |event| {
        if let Event::Action(action) = event {
            match action {
                ActionEvent::Succeeded { source, .. } => {
                    term.write_line(&format!(
                        "{} Moved to recycle bin: {}",
                        style("✓").green(),
                        display_path(source)
                    ))
                    .ok();
                }
                ActionEvent::Failed { path, message } => {
                    term.write_line(&format!(
                        "{} {}: {}",
                        style("✗").red(),
                        display_path(path),
                        message
                    ))
                    .ok();
                }
                _ => {}
            }
        }
    });

    term.write_line("").ok();
    term.write_line(&format!(
        "{} {} moved to the recycle bin, {} failed",
        style("Done.").bold(),
        style(result.trashed.len()).cyan(),
        style(result.failures.len()).yellow()
    ))
    .ok();

    Ok(())
}

fn print_summary(term: &Term, plan: &DedupePlan) {
    term.write_line(&format!(
        "Folder 1: {} ({} files)",
        style(display_path(&plan.folder_a)).bold(),
        plan.files_in_a
    ))
    .ok();
    if let Some(ref excluded) = plan.excluded_from_a {
        term.write_line(&format!("  excluding {}", display_path(excluded)))
            .ok();
    }
    term.write_line(&format!(
        "Folder 2: {} ({} files)",
        style(display_path(&plan.folder_b)).bold(),
        plan.files_in_b
    ))
    .ok();
    if let Some(ref excluded) = plan.excluded_from_b {
        term.write_line(&format!("  excluding {}", display_path(excluded)))
            .ok();
    }

    let unreadable = plan.scan_failures.len() + plan.hash_failures.len();
    if unreadable > 0 {
        term.write_line(&format!(
            "{} {} file(s) could not be read and were skipped",
            style("!").yellow(),
            unreadable
        ))
        .ok();
    }
    if !plan.aliased.is_empty() {
        term.write_line(&format!(
            "{} {} file(s) reached through links into the other folder were skipped",
            style("!").yellow(),
            plan.aliased.len()
        ))
        .ok();
    }
    term.write_line("").ok();
}

/// List every pair and require a typed `yes`
fn confirm_delete(term: &Term, plan: &DedupePlan) -> io::Result<bool> {
    print_pairs(term, plan);
    ask(
        term,
        "Do you want to move these files to the recycle bin? Type 'yes' to confirm:",
        "yes",
    )
}

fn print_pairs(term: &Term, plan: &DedupePlan) {
    term.write_line(&format!(
        "Found {} duplicate file(s) in Folder 1 that also exist in Folder 2:",
        style(plan.pairs.len()).cyan().bold()
    ))
    .ok();
    term.write_line("").ok();

    for pair in &plan.pairs {
        term.write_line(&format!(
            "  {}  {}  {}",
            display_path(&pair.duplicate),
            style("<==>").dim(),
            display_path(&pair.original)
        ))
        .ok();
    }
    term.write_line("").ok();
}
