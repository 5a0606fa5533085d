//! File filtering logic for the scanner.

use super::MediaKind;
use std::collections::HashSet;
use std::path::Path;

/// Extensions accepted when nothing else is configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "mp4"];

/// Filters files by extension, case-insensitively
#[derive(Debug, Clone)]
pub struct MediaFilter {
    /// Lowercase extensions without the leading dot
    extensions: HashSet<String>,
}

impl MediaFilter {
    /// Create a new filter with the default extensions
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Override the list of extensions to accept.
    ///
    /// Accepts `"JPG"`, `"jpg"` or `".jpg"` alike.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }

    /// Get the media kind for a path
    pub fn kind(&self, path: &Path) -> MediaKind {
        MediaKind::from_path(path)
    }
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_defaults_in_any_case() {
        let filter = MediaFilter::new();
        assert!(filter.should_include(Path::new("/photos/image.jpg")));
        assert!(filter.should_include(Path::new("/photos/image.JPEG")));
        assert!(filter.should_include(Path::new("/photos/clip.Mp4")));
    }

    #[test]
    fn filter_excludes_other_extensions() {
        let filter = MediaFilter::new();
        assert!(!filter.should_include(Path::new("/photos/image.png")));
        assert!(!filter.should_include(Path::new("/photos/notes.txt")));
    }

    #[test]
    fn filter_handles_no_extension() {
        let filter = MediaFilter::new();
        assert!(!filter.should_include(Path::new("/photos/jpg")));
    }

    #[test]
    fn custom_extensions_are_normalized() {
        let filter = MediaFilter::new().with_extensions([".PNG", "heic"]);
        assert!(filter.should_include(Path::new("a.png")));
        assert!(filter.should_include(Path::new("b.HEIC")));
        assert!(!filter.should_include(Path::new("c.jpg")));
    }
}
