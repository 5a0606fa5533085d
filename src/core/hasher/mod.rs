//! # Hasher Module
//!
//! Computes content hashes for files and groups paths by digest.
//!
//! ## How It Works
//! 1. Stream the file through SHA-256 in fixed-size chunks
//! 2. Hex-encode the digest
//! 3. Bucket paths by digest, keeping first-seen order
//!
//! Files that cannot be read are reported and left out of the index.

use crate::error::HashError;
use crate::events::{Event, HashEvent, HashProgress};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Read size used while streaming a file into the hasher
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Lowercase hex SHA-256 digest of a file's bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// The hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash one file's content
pub fn file_hash(path: &Path) -> Result<ContentHash, HashError> {
    let io_error = |source| HashError::IoError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer).map_err(io_error)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(ContentHash(format!("{:x}", hasher.finalize())))
}

/// Digest to paths, scoped to one folder tree.
///
/// Both the digests and the paths inside each bucket keep the order in
/// which they were inserted.
#[derive(Debug, Clone, Default)]
pub struct HashIndex {
    buckets: HashMap<ContentHash, Vec<PathBuf>>,
    order: Vec<ContentHash>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `path` has content `hash`
    pub fn insert(&mut self, hash: ContentHash, path: PathBuf) {
        match self.buckets.get_mut(&hash) {
            Some(paths) => paths.push(path),
            None => {
                self.order.push(hash.clone());
                self.buckets.insert(hash, vec![path]);
            }
        }
    }

    /// Paths with this digest, in insertion order
    pub fn get(&self, hash: &ContentHash) -> Option<&[PathBuf]> {
        self.buckets.get(hash).map(Vec::as_slice)
    }

    /// Iterate buckets in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&ContentHash, &[PathBuf])> + '_ {
        self.order
            .iter()
            .filter_map(|hash| self.buckets.get(hash).map(|paths| (hash, paths.as_slice())))
    }

    /// Number of distinct digests
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of paths across all buckets
    pub fn file_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Result of hashing a batch of files
#[derive(Debug, Default)]
pub struct HashReport {
    /// Successfully hashed files
    pub index: HashIndex,
    /// Files that could not be read (excluded from the index)
    pub errors: Vec<HashError>,
}

/// Hash every path, emitting a progress event after each file.
///
/// A path listed more than once is hashed once.
pub fn hash_files<F>(paths: &[PathBuf], mut on_event: F) -> HashReport
where
    F: FnMut(&Event),
{
    let total = paths.len();
    let mut report = HashReport::default();
    let mut seen: HashSet<&Path> = HashSet::with_capacity(total);

    on_event(&Event::Hash(HashEvent::Started { total_files: total }));

    for (i, path) in paths.iter().enumerate() {
        if seen.insert(path.as_path()) {
            match file_hash(path) {
                Ok(hash) => {
                    debug!(path = %path.display(), %hash, "hashed");
                    report.index.insert(hash, path.clone());
                }
                Err(e) => {
                    warn!("{}", e);
                    on_event(&Event::Hash(HashEvent::Error {
                        path: path.clone(),
                        message: e.to_string(),
                    }));
                    report.errors.push(e);
                }
            }
        }

        on_event(&Event::Hash(HashEvent::Progress(HashProgress {
            completed: i + 1,
            total,
            current_path: path.clone(),
        })));
    }

    info!(
        hashed = report.index.file_count(),
        failed = report.errors.len(),
        "hashing finished"
    );
    on_event(&Event::Hash(HashEvent::Completed {
        total_hashed: report.index.file_count(),
        failures: report.errors.len(),
    }));

    report
}
