// resegment-core/tests/discovery_tests.rs

mod common;

use common::touch;
use resegment_core::discovery::{find_files_with_extensions, find_processable_files, fragment_paths};
use resegment_core::error::CoreError;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn sources() -> Vec<String> {
    [".mp4", ".avi", ".mov", ".mkv"].iter().map(|e| e.to_string()).collect()
}

#[test]
fn test_find_processable_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    touch(input_dir, "b.mkv");
    touch(input_dir, "a.mp4");
    touch(input_dir, "C.mov");
    touch(input_dir, "shout.MP4"); // suffix match is case-sensitive
    touch(input_dir, "document.txt");
    touch(input_dir, "clip.flv"); // not a source extension
    fs::create_dir(input_dir.join("subdir"))?;
    touch(&input_dir.join("subdir"), "nested.mkv"); // top level only
    fs::create_dir(input_dir.join("folder.mp4"))?; // directories are skipped

    let files = find_processable_files(input_dir, &sources())?;

    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["C.mov", "a.mp4", "b.mkv"]);
    Ok(())
}

#[test]
fn test_find_processable_files_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    touch(dir.path(), "document.txt");

    match find_processable_files(dir.path(), &sources()) {
        Err(CoreError::NoFilesFound) => {}
        other => panic!("Unexpected result: {other:?}"),
    }

    // The renamer's variant treats nothing found as an empty list.
    assert!(find_files_with_extensions(dir.path(), &sources())?.is_empty());
    Ok(())
}

#[test]
fn test_find_processable_files_nonexistent_dir() {
    let non_existent_path = PathBuf::from("surely_this_does_not_exist_42_integration");
    match find_processable_files(&non_existent_path, &sources()) {
        Err(CoreError::Io(_)) => {}
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn overlapping_extensions_list_a_file_once() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    touch(dir.path(), "a.mp4");
    let extensions = vec![".mp4".to_string(), "4".to_string(), ".mp4".to_string()];

    let files = find_files_with_extensions(dir.path(), &extensions)?;
    assert_eq!(files, vec![dir.path().join("a.mp4")]);
    Ok(())
}

#[test]
fn fragments_are_matched_by_stem_and_extension() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    touch(dir.path(), "trip_part001.mp4");
    touch(dir.path(), "trip_part000.mp4");
    touch(dir.path(), "trip_part000.mkv"); // other extension
    touch(dir.path(), "trip2_part000.mp4"); // other source
    touch(dir.path(), "trip.mp4");

    let fragments = fragment_paths(dir.path(), "trip", ".mp4")?;
    assert_eq!(
        fragments,
        vec![
            dir.path().join("trip_part000.mp4"),
            dir.path().join("trip_part001.mp4"),
        ]
    );
    Ok(())
}

#[test]
fn hidden_files_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    touch(dir.path(), ".mp4");
    touch(dir.path(), ".MP4x.mp4");
    touch(dir.path(), ".partial.mkv");
    touch(dir.path(), "visible.mp4");

    let files = find_files_with_extensions(dir.path(), &sources())?;
    assert_eq!(files, vec![dir.path().join("visible.mp4")]);
    Ok(())
}
