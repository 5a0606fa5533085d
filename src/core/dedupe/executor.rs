//! Executor for dedupe plans.

use super::types::*;
use crate::error::{ActionError, FileFailure};
use crate::events::{ActionEvent, Event};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Recoverable deletion.
///
/// Implement this to route deletions somewhere other than the system
/// recycle bin (e.g. in tests).
pub trait Trasher {
    /// Move one file to recoverable storage
    fn trash(&self, path: &Path) -> Result<(), ActionError>;
}

/// The platform recycle bin / trash, via the `trash` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl Trasher for SystemTrash {
    fn trash(&self, path: &Path) -> Result<(), ActionError> {
        trash::delete(path).map_err(|e| ActionError::Trash {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Move each path to the trash. A failure is logged and recorded, and the
/// remaining paths are still processed.
pub fn delete_files<T, F>(trasher: &T, paths: &[PathBuf], mut on_event: F) -> TrashResult
where
    T: Trasher + ?Sized,
    F: FnMut(&Event),
{
    let start = Instant::now();
    let mut result = TrashResult::default();

    on_event(&Event::Action(ActionEvent::Started { total: paths.len() }));

    for path in paths {
        let outcome = if path.exists() {
            trasher.trash(path)
        } else {
            Err(ActionError::SourceMissing { path: path.clone() })
        };

        match outcome {
            Ok(()) => {
                info!("Moved to recycle bin: {}", path.display());
                on_event(&Event::Action(ActionEvent::Succeeded {
                    source: path.clone(),
                    destination: None,
                }));
                result.trashed.push(path.clone());
            }
            Err(e) => {
                warn!("{}", e);
                on_event(&Event::Action(ActionEvent::Failed {
                    path: path.clone(),
                    message: e.to_string(),
                }));
                result.failures.push(FileFailure::new(path.clone(), &e));
            }
        }
    }

    on_event(&Event::Action(ActionEvent::Completed {
        succeeded: result.trashed.len(),
        failed: result.failures.len(),
    }));

    result.duration_ms = start.elapsed().as_millis() as u64;
    result
}

/// Executes dedupe plans
pub struct DedupeExecutor;

impl DedupeExecutor {
    /// Trash every folder-A file in the plan. Folder-B files are never touched.
    pub fn execute<T, F>(plan: &DedupePlan, trasher: &T, on_event: F) -> TrashResult
    where
        T: Trasher + ?Sized,
        F: FnMut(&Event),
    {
        delete_files(trasher, &plan.duplicates(), on_event)
    }
}
