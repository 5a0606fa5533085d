//! Scanner for listing and dating media files.

use super::types::{DateSource, OrganizeConfig};
use crate::core::metadata::{exif_date_taken, file_modification_date};
use crate::core::scanner::{MediaKind, ScanConfig, ScanResult, WalkDirScanner};
use crate::error::ScanError;
use crate::events::Event;
use chrono::NaiveDateTime;
use std::path::Path;

/// Scanner for extracting dates from photos/videos
pub struct OrganizeScanner;

impl OrganizeScanner {
    /// Pick the date a file is sorted by.
    ///
    /// Images use EXIF DateTimeOriginal and fall back to the modification
    /// time; videos and other kinds use the modification time only.
    pub fn capture_date(
        path: &Path,
        kind: MediaKind,
    ) -> std::io::Result<(NaiveDateTime, DateSource)> {
        if kind.may_have_exif() {
            if let Some(date) = exif_date_taken(path) {
                return Ok((date, DateSource::Exif));
            }
        }

        file_modification_date(path).map(|date| (date, DateSource::Modified))
    }

    /// List supported files directly inside the source folder (no
    /// recursion), in file-name order
    pub fn list_top_level<F>(config: &OrganizeConfig, on_event: F) -> Result<ScanResult, ScanError>
    where
        F: FnMut(&Event),
    {
        WalkDirScanner::new(ScanConfig {
            extensions: Some(config.extensions.clone()),
            exclude: None,
            recursive: false,
            follow_symlinks: false,
        })
        .scan(&config.source, on_event)
    }
}
