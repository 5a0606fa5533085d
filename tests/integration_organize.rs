mod common;

use common::{jpeg_with_date_taken, set_mtime, tree, write};
use media_tidy::core::organize::{
    DateGranularity, DateSource, OrganizeConfig, OrganizeExecutor, OrganizePlanner,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn exif_date_wins_over_modification_time() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("camera");
    let output = temp.path().join("sorted");
    let photo = write(&source, "IMG_0042.jpg", &jpeg_with_date_taken("2022:01:06 14:30:00"));
    set_mtime(&photo, 2019, 5, 5);

    let config = OrganizeConfig::new(&source, &output, DateGranularity::Day);
    let plan = OrganizePlanner::create_plan(&config, |_| {}).unwrap();

    assert_eq!(plan.moves.len(), 1);
    assert_eq!(plan.moves[0].date_source, DateSource::Exif);

    let result = OrganizeExecutor::execute(&plan, |_| {});
    assert!(result.failures.is_empty());
    assert_eq!(tree(&output), vec!["2022/01/06/IMG_0042.jpg"]);
    assert!(tree(&source).is_empty());
}

#[test]
fn video_is_sorted_by_modification_month() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("camera");
    let output = temp.path().join("sorted");
    let clip = write(&source, "clip.mp4", b"not really a video");
    set_mtime(&clip, 2021, 7, 1);

    let config = OrganizeConfig::new(&source, &output, DateGranularity::Month);
    let plan = OrganizePlanner::create_plan(&config, |_| {}).unwrap();
    OrganizeExecutor::execute(&plan, |_| {});

    assert_eq!(tree(&output), vec!["2021/07/clip.mp4"]);
}

#[test]
fn name_clashes_get_numbered_suffixes() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("camera");
    let output = temp.path().join("sorted");

    // Already organized earlier
    write(&output.join("2023"), "IMG_0001.jpg", b"old");
    write(&output.join("2023"), "IMG_0001_1.jpg", b"older");

    let a = write(&source, "IMG_0001.jpg", b"new");
    let b = write(&source, "IMG_0002.jpg", b"other");
    set_mtime(&a, 2023, 3, 1);
    set_mtime(&b, 2023, 8, 9);

    let config = OrganizeConfig::new(&source, &output, DateGranularity::Year);
    let plan = OrganizePlanner::create_plan(&config, |_| {}).unwrap();
    assert_eq!(plan.renamed_count, 1);
    assert!(plan.moves[0].renamed);
    assert!(!plan.moves[1].renamed);

    let result = OrganizeExecutor::execute(&plan, |_| {});
    assert_eq!(result.moved.len(), 2);
    assert!(result.failures.is_empty());

    assert_eq!(
        tree(&output),
        vec![
            "2023/IMG_0001.jpg",
            "2023/IMG_0001_1.jpg",
            "2023/IMG_0001_2.jpg",
            "2023/IMG_0002.jpg",
        ]
    );
    assert_eq!(fs::read(output.join("2023/IMG_0001_2.jpg")).unwrap(), b"new");
    assert_eq!(fs::read(output.join("2023/IMG_0001.jpg")).unwrap(), b"old");
    assert_eq!(fs::read(output.join("2023/IMG_0001_1.jpg")).unwrap(), b"older");
}

#[test]
fn subfolders_of_source_are_not_touched() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("camera");
    let output = temp.path().join("sorted");
    let top = write(&source, "top.jpg", b"1");
    set_mtime(&top, 2020, 2, 29);
    write(&source.join("kept"), "deep.jpg", b"2");
    write(&source, "notes.txt", b"3");

    let config = OrganizeConfig::new(&source, &output, DateGranularity::Day);
    let plan = OrganizePlanner::create_plan(&config, |_| {}).unwrap();
    OrganizeExecutor::execute(&plan, |_| {});

    assert_eq!(tree(&output), vec!["2020/02/29/top.jpg"]);
    assert_eq!(tree(&source), vec!["kept/deep.jpg", "notes.txt"]);
}

#[test]
fn declining_means_nothing_changes() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("camera");
    let output = temp.path().join("sorted");
    write(&source, "a.jpg", b"a");
    write(&source, "b.mp4", b"b");

    let config = OrganizeConfig::new(&source, &output, DateGranularity::Day);
    let plan = OrganizePlanner::create_plan(&config, |_| {}).unwrap();

    assert_eq!(plan.moves.len(), 2);
    assert!(!output.exists());
    assert_eq!(tree(&source), vec!["a.jpg", "b.mp4"]);
}
