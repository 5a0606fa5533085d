//! Plan generator for organization operations.

use super::scanner::OrganizeScanner;
use super::types::*;
use crate::core::scanner::absolute_path;
use crate::error::{FileFailure, ScanError};
use crate::events::Event;
use chrono::Datelike;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Destination folder for a date: `base/YYYY`, `base/YYYY/MM` or
/// `base/YYYY/MM/DD`
pub fn target_dir(base: &Path, date: &impl Datelike, granularity: DateGranularity) -> PathBuf {
    let mut path = base.join(date.year().to_string());

    if matches!(granularity, DateGranularity::Month | DateGranularity::Day) {
        path.push(format!("{:02}", date.month()));
    }
    if granularity == DateGranularity::Day {
        path.push(format!("{:02}", date.day()));
    }

    path
}

/// `path` if nothing is there, otherwise the first free `stem_N.ext`
pub fn unique_path(path: &Path) -> PathBuf {
    DestinationRegistry::new().claim(path)
}

/// Hands out destination paths that exist neither on disk nor earlier in
/// the same plan.
///
/// The suffix counter for a base path only moves forward, so a name
/// handed out once is never handed out again.
#[derive(Debug, Default)]
pub struct DestinationRegistry {
    claimed: HashSet<PathBuf>,
    counters: HashMap<PathBuf, usize>,
}

impl DestinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return a free path for `path`
    pub fn claim(&mut self, path: &Path) -> PathBuf {
        if !self.is_taken(path) {
            self.claimed.insert(path.to_path_buf());
            return path.to_path_buf();
        }

        let counter = self.counters.entry(path.to_path_buf()).or_insert(1);
        loop {
            let candidate = with_suffix(path, *counter);
            *counter += 1;

            // symlink_metadata so a dangling link still counts as taken
            if !self.claimed.contains(&candidate) && fs::symlink_metadata(&candidate).is_err() {
                self.claimed.insert(candidate.clone());
                return candidate;
            }
        }
    }

    fn is_taken(&self, path: &Path) -> bool {
        self.claimed.contains(path) || fs::symlink_metadata(path).is_ok()
    }
}

fn with_suffix(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let new_name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}_{}", stem, n),
    };
    path.with_file_name(new_name)
}

/// Generates organization plans
pub struct OrganizePlanner;

impl OrganizePlanner {
    /// Date every top-level media file in the source folder and decide its
    /// destination.
    ///
    /// Nothing on disk is changed: destination folders are created by the
    /// executor.
    pub fn create_plan<F>(config: &OrganizeConfig, on_event: F) -> Result<OrganizePlan, ScanError>
    where
        F: FnMut(&Event),
    {
        let scanned = OrganizeScanner::list_top_level(config, on_event)?;

        let destination = absolute_path(&config.destination);
        let mut registry = DestinationRegistry::new();
        let mut moves = Vec::with_capacity(scanned.files.len());
        let mut skipped: Vec<FileFailure> = scanned
            .errors
            .iter()
            .map(|e| FileFailure::new(e.path().clone(), e))
            .collect();
        let mut renamed_count = 0;

        for file in &scanned.files {
            let (date, date_source) = match OrganizeScanner::capture_date(&file.path, file.kind) {
                Ok(dated) => dated,
                Err(e) => {
                    warn!("Cannot date {}: {}", file.path.display(), e);
                    skipped.push(FileFailure::new(file.path.clone(), &e));
                    continue;
                }
            };

            let Some(filename) = file.path.file_name() else {
                continue;
            };

            let folder = target_dir(&destination, &date, config.granularity);
            let wanted = folder.join(filename);
            let chosen = registry.claim(&wanted);
            let renamed = chosen != wanted;
            if renamed {
                renamed_count += 1;
            }

            debug!(
                source = %file.path.display(),
                destination = %chosen.display(),
                ?date_source,
                "planned move"
            );

            moves.push(PlannedMove {
                source: file.path.clone(),
                destination: chosen,
                date,
                date_source,
                renamed,
            });
        }

        info!(
            moves = moves.len(),
            renamed = renamed_count,
            skipped = skipped.len(),
            "organize plan ready"
        );

        Ok(OrganizePlan {
            id: Uuid::new_v4().to_string(),
            source: absolute_path(&config.source),
            destination,
            granularity: config.granularity,
            moves,
            skipped,
            renamed_count,
        })
    }
}
