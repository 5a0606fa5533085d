//! `media-tidy organize`

use super::prompt::ask;
use super::{display_path, OutputFormat, ProgressReporter};
use console::{style, Term};
use media_tidy::core::organize::{
    DateGranularity, DateSource, OrganizeConfig, OrganizeExecutor, OrganizePlan, OrganizePlanner,
};
use media_tidy::error::{MediaTidyError, Result};
use media_tidy::events::{ActionEvent, Event};
use std::path::PathBuf;

pub struct OrganizeArgs {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub granularity: DateGranularity,
    pub extensions: Vec<String>,
    pub dry_run: bool,
    pub output: OutputFormat,
}

pub fn run(args: OrganizeArgs) -> Result<()> {
    let term = Term::stdout();
    let pretty = args.output == OutputFormat::Pretty;

    let config = OrganizeConfig {
        source: args.source,
        destination: args.output_dir,
        granularity: args.granularity,
        extensions: args.extensions,
    };

    let mut progress = ProgressReporter::new(pretty);
    let plan = OrganizePlanner::create_plan(&config, |event| progress.handle(event))?;

    if !pretty {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for skipped in &plan.skipped {
        term.write_line(&format!(
            "{} Skipping {}: {}",
            style("!").yellow(),
            display_path(&skipped.path),
            skipped.message
        ))
        .ok();
    }

    if plan.is_empty() {
        term.write_line("No files to organize.").ok();
        return Ok(());
    }

    print_moves(&term, &plan);

    if args.dry_run {
        term.write_line(&format!("{}", style("Dry run: no files were moved.").dim()))
            .ok();
        return Ok(());
    }

    let confirmed = ask(
        &term,
        "Do you want to proceed with moving these files? [y/n]",
        "y",
    )
    .map_err(MediaTidyError::Prompt)?;

    if !confirmed {
        term.write_line("Operation cancelled.").ok();
        return Ok(());
    }

    let result = OrganizeExecutor::execute(&plan, |event| {
        if let Event::Action(action) = event {
            match action {
                ActionEvent::Succeeded {
                    source,
                    destination: Some(destination),
                } => {
                    term.write_line(&format!(
                        "{} Moved: {} -> {}",
                        style("✓").green(),
                        display_path(source),
                        display_path(destination)
                    ))
                    .ok();
                }
                ActionEvent::Failed { path, message } => {
                    term.write_line(&format!(
                        "{} Failed to move {}: {}",
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
        "{} {} moved, {} folder(s) created, {} failed",
        style("Done.").bold(),
        style(result.moved.len()).cyan(),
        result.folders_created,
        style(result.failures.len()).yellow()
    ))
    .ok();

    Ok(())
}

fn print_moves(term: &Term, plan: &OrganizePlan) {
    term.write_line(&format!("{}", style("Proposed file moves:").bold().underlined()))
        .ok();
    term.write_line("").ok();

    for planned in &plan.moves {
        let source_tag = match planned.date_source {
            DateSource::Exif => "exif",
            DateSource::Modified => "modified",
        };
        term.write_line(&format!(
            "  {}  ->  {} {}",
            display_path(&planned.source),
            display_path(&planned.destination),
            style(format!("({})", source_tag)).dim()
        ))
        .ok();
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "{} file(s) to move, {} renamed to avoid a name clash",
        style(plan.moves.len()).cyan(),
        plan.renamed_count
    ))
    .ok();
    term.write_line("").ok();
}
