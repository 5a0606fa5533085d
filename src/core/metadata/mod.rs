//! # Metadata Module
//!
//! Reads the dates media files can be sorted by.
//!
//! ## Sources
//! - EXIF `DateTimeOriginal` (when the photo was taken)
//! - Filesystem last-modified time (universal fallback)
//!
//! EXIF is typically found in JPEG and TIFF files. Videos are dated by
//! modification time only.

use chrono::{DateTime, Local, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// EXIF date format: "YYYY:MM:DD HH:MM:SS"
const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Read the original capture time embedded in an image.
///
/// Returns `None` when the file has no EXIF, no `DateTimeOriginal`, or an
/// unparseable value. Read errors are logged, never returned.
pub fn exif_date_taken(path: &Path) -> Option<NaiveDateTime> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("EXIF error for {}: {}", path.display(), e);
            return None;
        }
    };

    let mut bufreader = BufReader::new(file);
    let exif_reader = match Reader::new().read_from_container(&mut bufreader) {
        Ok(r) => r,
        Err(exif::Error::NotFound(_)) => {
            debug!(path = %path.display(), "no EXIF data");
            return None;
        }
        Err(e) => {
            warn!("EXIF error for {}: {}", path.display(), e);
            return None;
        }
    };

    let field = exif_reader.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;
    let Value::Ascii(ref vec) = field.value else {
        debug!(path = %path.display(), "DateTimeOriginal is not ASCII");
        return None;
    };

    let raw = std::str::from_utf8(vec.first()?).ok()?;
    let parsed = parse_exif_datetime(raw);
    if parsed.is_none() {
        debug!(path = %path.display(), value = raw, "unparseable DateTimeOriginal");
    }
    parsed
}

/// Parse an EXIF timestamp, tolerating trailing NULs and padding
pub fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim_end_matches('\0').trim();

    NaiveDateTime::parse_from_str(s, EXIF_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Filesystem last-modified time, in local time
pub fn file_modification_date(path: &Path) -> std::io::Result<NaiveDateTime> {
    let modified = fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = modified.into();
    Ok(local.naive_local())
}
