//! Directory walking implementation using walkdir.

use super::{absolute_path, filter::MediaFilter, MediaFile, ScanResult};
use crate::error::ScanError;
use crate::events::{Event, ScanEvent};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
    /// Subtree to skip entirely
    pub exclude: Option<PathBuf>,
    /// Descend into subdirectories (false = top-level files only)
    pub recursive: bool,
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: None,
            exclude: None,
            recursive: true,
            follow_symlinks: false,
        }
    }
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: MediaFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = MediaFilter::new();

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions);
        }

        Self { config, filter }
    }

    /// Scan one directory.
    ///
    /// Entries are visited in file-name order, so "first in traversal
    /// order" is stable between runs.
    pub fn scan<F>(&self, root: &Path, mut on_event: F) -> Result<ScanResult, ScanError>
    where
        F: FnMut(&Event),
    {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let root = absolute_path(root);
        let exclude = self.config.exclude.as_deref().map(absolute_path);

        on_event(&Event::Scan(ScanEvent::Started {
            root: root.clone(),
            exclude: exclude.clone(),
        }));

        let mut result = ScanResult::default();

        let mut walker = WalkDir::new(&root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if !self.config.recursive {
            walker = walker.max_depth(1);
        }

        let entries = walker.into_iter().filter_entry(|entry| match exclude {
            Some(ref excluded) => !entry.path().starts_with(excluded),
            None => true,
        });

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadDirectory {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    warn!(path = %path.display(), "{}", error);
                    on_event(&Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));
                    result.errors.push(error);
                    continue;
                }
            };

            let path = entry.path();

            if !path.is_file() || !self.filter.should_include(path) {
                continue;
            }

            match path.metadata() {
                Ok(metadata) => {
                    debug!(path = %path.display(), "found candidate");
                    on_event(&Event::Scan(ScanEvent::FileFound {
                        path: path.to_path_buf(),
                    }));

                    result.files.push(MediaFile {
                        path: path.to_path_buf(),
                        size: metadata.len(),
                        modified: metadata
                            .modified()
                            .unwrap_or(std::time::SystemTime::UNIX_EPOCH),
                        kind: self.filter.kind(path),
                    });
                }
                Err(e) => {
                    let error = ScanError::ReadDirectory {
                        path: path.to_path_buf(),
                        source: e,
                    };

                    warn!(path = %path.display(), "{}", error);
                    on_event(&Event::Scan(ScanEvent::Error {
                        path: path.to_path_buf(),
                        message: error.to_string(),
                    }));
                    result.errors.push(error);
                }
            }
        }

        on_event(&Event::Scan(ScanEvent::Completed {
            root,
            total_files: result.files.len(),
        }));

        Ok(result)
    }
}
