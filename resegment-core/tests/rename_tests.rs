// resegment-core/tests/rename_tests.rs

mod common;

use common::{listing, touch};
use resegment_core::rename::{RenameKind, plan_renames, rename_all, rename_all_in};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|e| e.to_string()).collect()
}

/// Writes each file with its own name as content so moves can be traced.
fn seed(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), name).unwrap();
    }
}

fn content(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn distinct_names_are_left_as_they_are() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    seed(dir.path(), &["a.mp4", "b.mkv", "holiday_part000.mov", "Zed.webm"]);

    let report = rename_all(dir.path(), None)?;

    assert_eq!(report.files_found, 4);
    assert_eq!(report.kept_count(), 4);
    assert_eq!(report.renumbered_count(), 0);
    assert!(report.is_clean());
    assert_eq!(
        listing(dir.path()),
        vec!["Zed.webm", "a.mp4", "b.mkv", "holiday_part000.mov"]
    );
    for name in ["a.mp4", "b.mkv", "holiday_part000.mov", "Zed.webm"] {
        assert_eq!(content(dir.path(), name), name);
    }
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn case_collision_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    seed(dir.path(), &["clip.mp4", "CLIP.mp4", "2.mp4"]);

    let report = rename_all(dir.path(), None)?;

    assert_eq!(listing(dir.path()), vec!["1.mp4", "2.mp4", "CLIP.mp4"]);
    assert_eq!(content(dir.path(), "2.mp4"), "2.mp4");
    assert_eq!(content(dir.path(), "CLIP.mp4"), "CLIP.mp4");
    assert_eq!(content(dir.path(), "1.mp4"), "clip.mp4");

    let kinds: HashMap<String, RenameKind> = report
        .outcomes
        .iter()
        .map(|o| (o.source.file_name().unwrap().to_string_lossy().into_owned(), o.kind))
        .collect();
    assert_eq!(kinds["2.mp4"], RenameKind::Kept);
    assert_eq!(kinds["CLIP.mp4"], RenameKind::Kept);
    assert_eq!(kinds["clip.mp4"], RenameKind::Renumbered);
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn earliest_in_sort_order_keeps_the_name() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    seed(dir.path(), &["movie.mkv", "Movie.mkv", "MOVIE.mkv", "mOvie.mkv"]);

    rename_all(dir.path(), None)?;

    // Byte order: MOVIE < Movie < mOvie < movie
    assert_eq!(
        listing(dir.path()),
        vec!["1.mkv", "2.mkv", "3.mkv", "MOVIE.mkv"]
    );
    assert_eq!(content(dir.path(), "MOVIE.mkv"), "MOVIE.mkv");
    assert_eq!(content(dir.path(), "1.mkv"), "Movie.mkv");
    assert_eq!(content(dir.path(), "2.mkv"), "mOvie.mkv");
    assert_eq!(content(dir.path(), "3.mkv"), "movie.mkv");
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn final_names_are_unique_ignoring_case_and_extensions_survive() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let names = [
        "a.mp4", "A.mp4", "1.mp4", "b.avi", "B.avi", "b.AVI", "2.avi", "c.mov", "C.MOV",
    ];
    seed(dir.path(), &names);
    let extensions = exts(&[".mp4", ".avi", ".AVI", ".mov", ".MOV"]);

    let report = rename_all_in(dir.path(), &extensions, "temp_rename")?;
    assert!(report.is_clean());

    let after = listing(dir.path());
    assert_eq!(after.len(), names.len());

    let lowered: HashSet<String> = after.iter().map(|n| n.to_lowercase()).collect();
    assert_eq!(lowered.len(), after.len(), "case-insensitive duplicate in {after:?}");

    let ext_of = |n: &str| Path::new(n).extension().unwrap().to_string_lossy().into_owned();
    let mut before_exts: Vec<String> = names.iter().map(|n| ext_of(n)).collect();
    let mut after_exts: Vec<String> = after.iter().map(|n| ext_of(n)).collect();
    before_exts.sort();
    after_exts.sort();
    assert_eq!(before_exts, after_exts);

    // Every original file is still present under some name.
    let mut contents: Vec<String> = after.iter().map(|n| content(dir.path(), n)).collect();
    contents.sort();
    let mut expected: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    expected.sort();
    assert_eq!(contents, expected);
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn extension_case_is_preserved_when_renumbering() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    seed(dir.path(), &["Trip.MP4", "trip.MP4"]);
    // An unrelated entry already holds the first number.
    fs::create_dir(dir.path().join("1.MP4"))?;

    let report = rename_all_in(dir.path(), &exts(&[".MP4"]), "temp_rename")?;

    assert_eq!(report.renumbered_count(), 1);
    assert_eq!(content(dir.path(), "Trip.MP4"), "Trip.MP4");
    assert_eq!(content(dir.path(), "2.MP4"), "trip.MP4");
    assert!(dir.path().join("1.MP4").is_dir());
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn unrelated_case_variant_does_not_claim_the_name() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    seed(dir.path(), &["a.mp4"]);
    // `.MP4` is not a default extension, so this file is not renamed.
    fs::write(dir.path().join("A.MP4"), "unrelated")?;

    let report = rename_all(dir.path(), None)?;

    assert_eq!(report.files_found, 1);
    assert_eq!(report.kept_count(), 1);
    assert_eq!(report.renumbered_count(), 0);
    assert_eq!(listing(dir.path()), vec!["A.MP4", "a.mp4"]);
    assert_eq!(content(dir.path(), "a.mp4"), "a.mp4");
    assert_eq!(content(dir.path(), "A.MP4"), "unrelated");
    Ok(())
}

#[test]
fn extension_match_is_case_sensitive() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    seed(dir.path(), &["upper.MP4", "lower.mp4", "notes.txt"]);

    let report = rename_all(dir.path(), None)?;

    assert_eq!(report.files_found, 1);
    assert_eq!(report.outcomes[0].source, dir.path().join("lower.mp4"));
    assert_eq!(listing(dir.path()), vec!["lower.mp4", "notes.txt", "upper.MP4"]);
    Ok(())
}

#[test]
fn no_matching_files_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    touch(dir.path(), "readme.txt");
    fs::create_dir(dir.path().join("nested"))?;
    touch(&dir.path().join("nested"), "inner.mp4");
    let before = listing(dir.path());

    let report = rename_all(dir.path(), None)?;

    assert_eq!(report.files_found, 0);
    assert!(report.outcomes.is_empty());
    assert!(report.scratch_dir.is_none());
    assert_eq!(listing(dir.path()), before);
    assert!(dir.path().join("nested").join("inner.mp4").exists());
    Ok(())
}

#[test]
fn scratch_directory_is_removed_after_a_clean_run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    seed(dir.path(), &["x.mp4", "y.mp4"]);

    let report = rename_all(dir.path(), None)?;

    assert!(report.scratch_removed);
    assert_eq!(report.scratch_dir, Some(dir.path().join("temp_rename")));
    assert!(!dir.path().join("temp_rename").exists());
    Ok(())
}

#[test]
fn leftover_scratch_directory_is_not_touched() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let leftover = dir.path().join("temp_rename");
    fs::create_dir(&leftover)?;
    fs::write(leftover.join("temp_0.mp4"), "from an earlier run")?;
    seed(dir.path(), &["x.mp4"]);

    let report = rename_all(dir.path(), None)?;

    assert_eq!(report.scratch_dir, Some(dir.path().join("temp_rename.1")));
    assert!(report.scratch_removed);
    assert_eq!(fs::read_to_string(leftover.join("temp_0.mp4"))?, "from an earlier run");
    assert_eq!(listing(dir.path()), vec!["temp_rename", "x.mp4"]);
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn dry_run_plans_without_moving() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    seed(dir.path(), &["clip.mp4", "CLIP.mp4", "2.mp4"]);
    let before = listing(dir.path());

    let report = plan_renames(dir.path(), &exts(&[".mp4"]))?;

    assert!(report.dry_run);
    assert_eq!(listing(dir.path()), before);
    let finals: Vec<String> = report
        .outcomes
        .iter()
        .map(|o| o.final_path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(finals, vec!["2.mp4", "CLIP.mp4", "1.mp4"]);
    Ok(())
}

#[test]
fn missing_directory_is_an_error() {
    let result = rename_all(Path::new("surely_this_does_not_exist_42_rename"), None);
    assert!(result.is_err());
}
