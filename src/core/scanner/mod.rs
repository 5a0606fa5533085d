//! # Scanner Module
//!
//! Discovers media files in directories.
//!
//! ## Default Formats
//! - JPEG (.jpg, .jpeg)
//! - MPEG-4 video (.mp4)
//!
//! Other extensions can be configured; matching is case-insensitive.
//!
//! ## Example
//! ```rust,ignore
//! use media_tidy::core::scanner::gather_files;
//!
//! let files = gather_files("/photos/2021".as_ref(), None, &["jpg", "mp4"])?;
//! ```

mod filter;
mod walker;

pub use filter::{MediaFilter, DEFAULT_EXTENSIONS};
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use crate::events;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Represents a discovered media file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modified time
    pub modified: SystemTime,
    /// Broad kind derived from the extension
    pub kind: MediaKind,
}

/// Broad media kind, which decides where a capture date can come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    /// Still image; may carry EXIF
    Image,
    /// Video; dated by modification time only
    Video,
    /// Anything else a user asked to include
    Other,
}

impl MediaKind {
    /// Detect kind from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "tif" | "tiff" | "heic" | "heif" | "webp" => MediaKind::Image,
            "mp4" | "mov" | "m4v" | "avi" | "mkv" => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }

    /// Detect kind from a path's extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(MediaKind::Other)
    }

    /// Whether embedded EXIF is worth reading for this kind
    pub fn may_have_exif(&self) -> bool {
        matches!(self, MediaKind::Image)
    }
}

/// Result of a scan operation
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered files, in traversal order
    pub files: Vec<MediaFile>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}

impl ScanResult {
    /// Paths of the discovered files, in traversal order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Resolve a path to an absolute, canonical form.
///
/// Falls back to joining with the current directory when the path cannot
/// be canonicalized (e.g. it does not exist yet).
pub fn absolute_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

/// Decide which folder must be excluded from which scan when one tree is
/// nested inside the other.
///
/// Returns `(exclude_from_a, exclude_from_b)`. When `b` lies inside `a`
/// (or is the same folder) `b` is excluded from the scan of `a`; when `a`
/// lies inside `b`, `a` is excluded from the scan of `b`.
pub fn nesting_exclusions(a: &Path, b: &Path) -> (Option<PathBuf>, Option<PathBuf>) {
    let a = absolute_path(a);
    let b = absolute_path(b);

    if b.starts_with(&a) {
        (Some(b), None)
    } else if a.starts_with(&b) {
        (None, Some(a))
    } else {
        (None, None)
    }
}

/// Whether `path`, once links are resolved, lies under `root` but not
/// under `excluded`. A path that cannot be resolved lies nowhere.
pub fn lives_under(path: &Path, root: &Path, excluded: Option<&Path>) -> bool {
    let Ok(real) = fs::canonicalize(path) else {
        return false;
    };
    real.starts_with(root) && !excluded.is_some_and(|e| real.starts_with(e))
}

/// Recursively list files under `root` with an allowed extension, skipping
/// everything under `exclude`.
pub fn gather_files<S: AsRef<str>>(
    root: &Path,
    exclude: Option<&Path>,
    extensions: &[S],
) -> Result<ScanResult, ScanError> {
    let config = ScanConfig {
        extensions: Some(extensions.iter().map(|e| e.as_ref().to_string()).collect()),
        exclude: exclude.map(Path::to_path_buf),
        ..Default::default()
    };
    WalkDirScanner::new(config).scan(root, events::ignore)
}
