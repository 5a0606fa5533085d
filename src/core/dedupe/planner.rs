//! Plan generator for dedupe runs.

use super::types::*;
use crate::core::comparator::find_duplicates;
use crate::core::hasher::hash_files;
use crate::core::scanner::{
    absolute_path, lives_under, nesting_exclusions, ScanConfig, WalkDirScanner,
};
use crate::error::{FileFailure, ScanError};
use crate::events::Event;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Generates dedupe plans
pub struct DedupePlanner;

impl DedupePlanner {
    /// Scan and hash both folders and pair up duplicates.
    ///
    /// Nothing on disk is changed. A missing folder is an error; unreadable
    /// entries and files are recorded in the plan.
    pub fn create_plan<F>(config: &DedupeConfig, mut on_event: F) -> Result<DedupePlan, ScanError>
    where
        F: FnMut(&Event),
    {
        for folder in [&config.folder_a, &config.folder_b] {
            if !folder.is_dir() {
                return Err(ScanError::DirectoryNotFound {
                    path: folder.clone(),
                });
            }
        }

        let (excluded_from_a, excluded_from_b) =
            nesting_exclusions(&config.folder_a, &config.folder_b);

        let scanner_for = |exclude| {
            WalkDirScanner::new(ScanConfig {
                extensions: Some(config.extensions.clone()),
                exclude,
                recursive: true,
                follow_symlinks: config.follow_symlinks,
            })
        };

        let scan_a = scanner_for(excluded_from_a.clone()).scan(&config.folder_a, &mut on_event)?;
        let scan_b = scanner_for(excluded_from_b.clone()).scan(&config.folder_b, &mut on_event)?;

        let scan_failures = scan_a
            .errors
            .iter()
            .chain(scan_b.errors.iter())
            .map(|e| FileFailure::new(e.path().clone(), e))
            .collect();

        // Links can lead a walk into the other folder; such files belong
        // to that folder, not this one.
        let folder_a = absolute_path(&config.folder_a);
        let folder_b = absolute_path(&config.folder_b);
        let mut aliased = Vec::new();
        let paths_a = own_files(
            scan_a.paths(),
            &folder_b,
            excluded_from_b.as_deref(),
            &mut aliased,
        );
        let paths_b = own_files(
            scan_b.paths(),
            &folder_a,
            excluded_from_a.as_deref(),
            &mut aliased,
        );

        let hashed_a = hash_files(&paths_a, &mut on_event);
        let hashed_b = hash_files(&paths_b, &mut on_event);

        let hash_failures = hashed_a
            .errors
            .iter()
            .chain(hashed_b.errors.iter())
            .map(|e| FileFailure::new(e.path().clone(), e))
            .collect();

        let mut pairs = find_duplicates(&hashed_a.index, &hashed_b.index);
        pairs.retain(|pair| {
            let same = same_file(&pair.duplicate, &pair.original);
            if same {
                warn!(
                    "Not offering {}: it is the same file as {}",
                    pair.duplicate.display(),
                    pair.original.display()
                );
            }
            !same
        });

        info!(
            files_in_a = paths_a.len(),
            files_in_b = paths_b.len(),
            aliased = aliased.len(),
            duplicates = pairs.len(),
            "dedupe plan ready"
        );

        Ok(DedupePlan {
            id: Uuid::new_v4().to_string(),
            folder_a,
            folder_b,
            excluded_from_a,
            excluded_from_b,
            files_in_a: paths_a.len(),
            files_in_b: paths_b.len(),
            scan_failures,
            hash_failures,
            aliased,
            pairs,
        })
    }
}

/// Keep the paths that do not really live in the other folder; the rest
/// go to `aliased`
fn own_files(
    paths: Vec<PathBuf>,
    other_root: &Path,
    other_excluded: Option<&Path>,
    aliased: &mut Vec<PathBuf>,
) -> Vec<PathBuf> {
    let (theirs, ours): (Vec<_>, Vec<_>) = paths
        .into_iter()
        .partition(|p| lives_under(p, other_root, other_excluded));

    for path in &theirs {
        warn!(
            "Skipping {}: it resolves into {}",
            path.display(),
            other_root.display()
        );
    }
    aliased.extend(theirs);
    ours
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn plan_pairs_shared_content_only() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        write(&a, "a1.jpg", b"X");
        write(&a, "a2.jpg", b"Y");
        write(&b, "b1.jpg", b"X");

        let plan = DedupePlanner::create_plan(&DedupeConfig::new(&a, &b), |_| {}).unwrap();

        assert_eq!(plan.files_in_a, 2);
        assert_eq!(plan.files_in_b, 1);
        assert_eq!(plan.pairs.len(), 1);
        assert!(plan.pairs[0].duplicate.ends_with("a1.jpg"));
        assert!(plan.pairs[0].original.ends_with("b1.jpg"));
    }

    #[test]
    fn nested_b_is_not_matched_against_itself() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("phone");
        let b = a.join("albums").join("arran");
        write(&a, "IMG_1.jpg", b"X");
        write(&b, "IMG_1.jpg", b"X");
        write(&b, "IMG_2.jpg", b"Z");

        let plan = DedupePlanner::create_plan(&DedupeConfig::new(&a, &b), |_| {}).unwrap();

        assert_eq!(plan.excluded_from_a, Some(absolute_path(&b)));
        assert_eq!(plan.files_in_a, 1);
        assert_eq!(file_names(&plan.duplicates()), vec!["IMG_1.jpg"]);
        let b = absolute_path(&b);
        assert!(plan.pairs.iter().all(|p| !p.duplicate.starts_with(&b)));
    }

    #[test]
    fn nested_a_is_excluded_from_b_scan() {
        let temp = TempDir::new().unwrap();
        let b = temp.path().join("library");
        let a = b.join("inbox");
        write(&a, "new.jpg", b"X");
        write(&b, "old.jpg", b"X");

        let plan = DedupePlanner::create_plan(&DedupeConfig::new(&a, &b), |_| {}).unwrap();

        assert_eq!(plan.excluded_from_b, Some(absolute_path(&a)));
        assert_eq!(plan.files_in_b, 1);
        assert_eq!(plan.pairs.len(), 1);
        assert!(plan.pairs[0].original.ends_with("old.jpg"));
    }

    #[test]
    fn extension_filter_applies_to_both_folders() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        write(&a, "a.png", b"X");
        write(&b, "b.png", b"X");

        let plan = DedupePlanner::create_plan(&DedupeConfig::new(&a, &b), |_| {}).unwrap();
        assert!(plan.is_empty());

        let mut config = DedupeConfig::new(&a, &b);
        config.extensions = vec!["png".to_string()];
        let plan = DedupePlanner::create_plan(&config, |_| {}).unwrap();
        assert_eq!(plan.pairs.len(), 1);
    }

    #[test]
    fn missing_folder_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = DedupePlanner::create_plan(
            &DedupeConfig::new(temp.path(), temp.path().join("missing")),
            |_| {},
        );
        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }

    #[cfg(unix)]
    fn follow_links(a: &Path, b: &Path) -> DedupeConfig {
        let mut config = DedupeConfig::new(a, b);
        config.follow_symlinks = true;
        config
    }

    #[cfg(unix)]
    #[test]
    fn link_from_a_into_b_never_offers_b_files() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        write(&b, "only_copy.jpg", b"X");
        write(&b, "second.jpg", b"X");
        std::os::unix::fs::symlink(&b, a.join("linked")).unwrap();

        let plan = DedupePlanner::create_plan(&follow_links(&a, &b), |_| {}).unwrap();

        assert!(plan.pairs.is_empty());
        assert_eq!(plan.files_in_a, 0);
        assert_eq!(plan.aliased.len(), 2);
        assert!(b.join("only_copy.jpg").exists());
    }

    #[cfg(unix)]
    #[test]
    fn link_from_b_into_a_is_not_an_original() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        write(&a, "photo.jpg", b"X");
        fs::create_dir_all(&b).unwrap();
        std::os::unix::fs::symlink(&a, b.join("back")).unwrap();

        let plan = DedupePlanner::create_plan(&follow_links(&a, &b), |_| {}).unwrap();

        assert!(plan.pairs.is_empty());
        assert_eq!(plan.files_in_b, 0);
    }

    #[cfg(unix)]
    #[test]
    fn links_to_one_outside_file_are_not_a_pair() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        let elsewhere = write(&temp.path().join("elsewhere"), "shared.jpg", b"X");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        std::os::unix::fs::symlink(&elsewhere, a.join("shared.jpg")).unwrap();
        std::os::unix::fs::symlink(&elsewhere, b.join("shared.jpg")).unwrap();

        let plan = DedupePlanner::create_plan(&follow_links(&a, &b), |_| {}).unwrap();

        assert!(plan.pairs.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn real_duplicates_survive_alongside_links() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        write(&a, "copy.jpg", b"X");
        write(&b, "keep.jpg", b"X");
        std::os::unix::fs::symlink(&b, a.join("linked")).unwrap();

        let plan = DedupePlanner::create_plan(&follow_links(&a, &b), |_| {}).unwrap();

        assert_eq!(file_names(&plan.duplicates()), vec!["copy.jpg"]);
        assert!(plan.pairs[0].original.ends_with("keep.jpg"));
    }
}
