//! # Comparator Module
//!
//! Pairs files in folder A with same-content files in folder B.
//!
//! ## Pairing Policy
//! Every folder-A file whose digest also appears in folder B is paired
//! with the *first* folder-B file carrying that digest (first in traversal
//! order). Several A files may point at the same B file. Nothing is ever
//! paired in the B → A direction.

use crate::core::hasher::{ContentHash, HashIndex};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A folder-A file and the folder-B file it duplicates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatePair {
    /// File in folder A (the one offered for deletion)
    pub duplicate: PathBuf,
    /// First same-content file in folder B (kept)
    pub original: PathBuf,
    /// Shared content digest
    pub hash: ContentHash,
}

/// Find every folder-A file that also exists in folder B.
///
/// Pairs come out in folder A's first-seen digest order. Runs in
/// O(total files) given hash lookups.
pub fn find_duplicates(folder_a: &HashIndex, folder_b: &HashIndex) -> Vec<DuplicatePair> {
    let mut pairs = Vec::new();

    for (hash, a_paths) in folder_a.iter() {
        let Some(original) = folder_b.get(hash).and_then(|b_paths| b_paths.first()) else {
            continue;
        };

        for duplicate in a_paths {
            pairs.push(DuplicatePair {
                duplicate: duplicate.clone(),
                original: original.clone(),
                hash: hash.clone(),
            });
        }
    }

    pairs
}
