//! File discovery for source videos, renamer candidates and split fragments.
//!
//! Only the top level of a directory is scanned and hidden files (names
//! starting with `.`) are ignored. Extension matching is a
//! case-sensitive suffix match on the file name, so `.mp4` does not pick up
//! `clip.MP4`. Results are sorted byte-wise on the path, which is the order
//! the renamer relies on to decide which file keeps a contested name.

use crate::error::{CoreError, CoreResult};

use std::fs;
use std::path::{Path, PathBuf};

/// Finds source videos in `input_dir`.
///
/// Returns `Err(CoreError::NoFilesFound)` when nothing matches so callers can
/// report it separately from an unreadable directory.
///
/// # Examples
///
/// ```rust,no_run
/// use resegment_core::find_processable_files;
/// use std::path::Path;
///
/// let extensions = vec![".mp4".to_string(), ".mkv".to_string()];
/// match find_processable_files(Path::new("."), &extensions) {
///     Ok(files) => println!("Found {} video files", files.len()),
///     Err(e) => println!("Error finding video files: {}", e),
/// }
/// ```
pub fn find_processable_files(input_dir: &Path, extensions: &[String]) -> CoreResult<Vec<PathBuf>> {
    let files = find_files_with_extensions(input_dir, extensions)?;
    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}

/// Lists regular, non-hidden files in `dir` whose name ends with one of
/// `extensions`.
///
/// Each file appears once even if several extensions match it. Names that are
/// not valid UTF-8 are skipped.
pub fn find_files_with_extensions(dir: &Path, extensions: &[String]) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::debug!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };

        // Hidden files are skipped, including a bare `.mp4`.
        if name.starts_with('.') {
            continue;
        }

        if extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            files.push(path);
        }
    }

    sort_paths(&mut files);
    Ok(files)
}

/// Lists the fragments the splitter produced for one source: files named
/// `{stem}_part*{ext}` in `dir`.
pub fn fragment_paths(dir: &Path, stem: &str, ext: &str) -> CoreResult<Vec<PathBuf>> {
    let prefix = format!("{stem}_part");
    let mut fragments = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| {
                name.len() >= prefix.len() + ext.len()
                    && name.starts_with(&prefix)
                    && name.ends_with(ext)
            });
        if matches {
            fragments.push(path);
        }
    }

    sort_paths(&mut fragments);
    Ok(fragments)
}

/// Sorts paths lexicographically on their byte representation and drops
/// duplicates.
pub fn sort_paths(paths: &mut Vec<PathBuf>) {
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    paths.dedup();
}
