//! Types for the dedupe module.

use crate::core::comparator::DuplicatePair;
use crate::core::scanner::DEFAULT_EXTENSIONS;
use crate::error::FileFailure;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a dedupe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupeConfig {
    /// Folder whose duplicates get removed
    pub folder_a: PathBuf,
    /// Folder that is only read
    pub folder_b: PathBuf,
    /// Extensions to consider, case-insensitive
    pub extensions: Vec<String>,
    pub follow_symlinks: bool,
}

impl DedupeConfig {
    pub fn new(folder_a: impl Into<PathBuf>, folder_b: impl Into<PathBuf>) -> Self {
        Self {
            folder_a: folder_a.into(),
            folder_b: folder_b.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            follow_symlinks: false,
        }
    }
}

/// The dedupe plan (preview)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupePlan {
    pub id: String,
    pub folder_a: PathBuf,
    pub folder_b: PathBuf,
    /// Subtree skipped while scanning folder A (folder B, when nested)
    pub excluded_from_a: Option<PathBuf>,
    /// Subtree skipped while scanning folder B (folder A, when nested)
    pub excluded_from_b: Option<PathBuf>,
    pub files_in_a: usize,
    pub files_in_b: usize,
    /// Entries that could not be listed
    pub scan_failures: Vec<FileFailure>,
    /// Files that could not be read, left out of matching
    pub hash_failures: Vec<FileFailure>,
    /// Files reached through a link that really live in the other folder,
    /// left out of matching
    #[serde(default)]
    pub aliased: Vec<PathBuf>,
    pub pairs: Vec<DuplicatePair>,
}

impl DedupePlan {
    /// Whether there is nothing to delete
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Folder-A paths that would be moved to the recycle bin
    pub fn duplicates(&self) -> Vec<PathBuf> {
        self.pairs.iter().map(|p| p.duplicate.clone()).collect()
    }
}

/// Result of executing a dedupe plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrashResult {
    pub trashed: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    pub duration_ms: u64,
}
