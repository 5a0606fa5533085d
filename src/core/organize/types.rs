//! Types for the organize module.

use crate::core::scanner::DEFAULT_EXTENSIONS;
use crate::error::FileFailure;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Depth of the date folder hierarchy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateGranularity {
    /// Year only (e.g., 2024/)
    Year,
    /// Year/Month (e.g., 2024/01/)
    Month,
    /// Year/Month/Day (e.g., 2024/01/15/)
    #[default]
    Day,
}

/// Where a file's date came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// EXIF DateTimeOriginal
    Exif,
    /// Filesystem modification time
    Modified,
}

/// Configuration for organize operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeConfig {
    /// Folder whose top-level files are organized
    pub source: PathBuf,
    /// Root of the date hierarchy
    pub destination: PathBuf,
    pub granularity: DateGranularity,
    /// Extensions to consider, case-insensitive
    pub extensions: Vec<String>,
}

impl OrganizeConfig {
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        granularity: DateGranularity,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            granularity,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// A single move decided during planning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMove {
    pub source: PathBuf,
    /// Collision-free destination file path
    pub destination: PathBuf,
    pub date: NaiveDateTime,
    pub date_source: DateSource,
    /// Destination needed a numeric suffix
    pub renamed: bool,
}

/// The organization plan (preview)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizePlan {
    pub id: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub granularity: DateGranularity,
    pub moves: Vec<PlannedMove>,
    /// Files that could not be dated and are left where they are
    pub skipped: Vec<FileFailure>,
    pub renamed_count: usize,
}

impl OrganizePlan {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Result of executing the plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeResult {
    /// (source, destination) of every completed move
    pub moved: Vec<(PathBuf, PathBuf)>,
    pub folders_created: usize,
    pub duration_ms: u64,
    pub failures: Vec<FileFailure>,
}
