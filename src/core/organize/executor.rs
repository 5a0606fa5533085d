//! Executor for organization plans.

use super::types::*;
use crate::error::{ActionError, FileFailure};
use crate::events::{ActionEvent, Event};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Executes organization plans
pub struct OrganizeExecutor;

impl OrganizeExecutor {
    /// Perform every planned move in order.
    ///
    /// Destination folders are created on demand. A failed move is logged
    /// and recorded and the remaining moves still run; completed moves are
    /// never rolled back.
    pub fn execute<F>(plan: &OrganizePlan, mut on_event: F) -> OrganizeResult
    where
        F: FnMut(&Event),
    {
        let start = Instant::now();
        let mut result = OrganizeResult::default();
        let mut created_dirs: HashSet<PathBuf> = HashSet::new();

        on_event(&Event::Action(ActionEvent::Started {
            total: plan.moves.len(),
        }));

        for planned in &plan.moves {
            match Self::execute_one(planned, &mut created_dirs, &mut result.folders_created) {
                Ok(()) => {
                    info!(
                        "Moved: {} -> {}",
                        planned.source.display(),
                        planned.destination.display()
                    );
                    on_event(&Event::Action(ActionEvent::Succeeded {
                        source: planned.source.clone(),
                        destination: Some(planned.destination.clone()),
                    }));
                    result
                        .moved
                        .push((planned.source.clone(), planned.destination.clone()));
                }
                Err(e) => {
                    warn!("{}", e);
                    on_event(&Event::Action(ActionEvent::Failed {
                        path: planned.source.clone(),
                        message: e.to_string(),
                    }));
                    result
                        .failures
                        .push(FileFailure::new(planned.source.clone(), &e));
                }
            }
        }

        on_event(&Event::Action(ActionEvent::Completed {
            succeeded: result.moved.len(),
            failed: result.failures.len(),
        }));

        result.duration_ms = start.elapsed().as_millis() as u64;
        result
    }

    fn execute_one(
        planned: &PlannedMove,
        created_dirs: &mut HashSet<PathBuf>,
        folders_created: &mut usize,
    ) -> Result<(), ActionError> {
        if !planned.source.is_file() {
            return Err(ActionError::SourceMissing {
                path: planned.source.clone(),
            });
        }

        if let Some(parent) = planned.destination.parent() {
            if !created_dirs.contains(parent) {
                if !parent.is_dir() {
                    fs::create_dir_all(parent).map_err(|source| ActionError::CreateDirectory {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                    *folders_created += 1;
                }
                created_dirs.insert(parent.to_path_buf());
            }
        }

        // Something may have appeared there since the plan was made.
        if fs::symlink_metadata(&planned.destination).is_ok() {
            return Err(ActionError::DestinationExists {
                path: planned.destination.clone(),
            });
        }

        move_file(&planned.source, &planned.destination).map_err(|source| ActionError::Move {
            source_path: planned.source.clone(),
            destination: planned.destination.clone(),
            source,
        })
    }
}

/// Rename, falling back to copy + verify + delete when rename fails
/// (e.g. across filesystems)
pub fn move_file(source: &Path, destination: &Path) -> std::io::Result<()> {
    fs::rename(source, destination)
        .or_else(|_| copy_then_remove(source, destination, |path| fs::remove_file(path)))
}

/// Copy, check the size, then drop the source with `remove_source`.
///
/// Whenever this fails the copy is removed again, so the file is left in
/// exactly one place.
fn copy_then_remove<R>(source: &Path, destination: &Path, remove_source: R) -> std::io::Result<()>
where
    R: FnOnce(&Path) -> std::io::Result<()>,
{
    let source_size = fs::metadata(source)?.len();
    if let Err(e) = fs::copy(source, destination) {
        let _ = fs::remove_file(destination);
        return Err(e);
    }

    let dest_size = fs::metadata(destination)?.len();
    if dest_size != source_size {
        let _ = fs::remove_file(destination);
        return Err(std::io::Error::other(format!(
            "Copy verification failed: source {} bytes, dest {} bytes",
            source_size, dest_size
        )));
    }

    remove_source(source).map_err(|e| {
        let _ = fs::remove_file(destination);
        e
    })
}
