// ============================================================================
// resegment-core/src/rename/mod.rs
// ============================================================================
//
// RENAMER: Conflict-Resolving, Two-Phase Rename of a Directory
//
// Given the video files in a directory, every file keeps its name unless a
// file earlier in sort order already claimed the same name (compared
// case-insensitively), in which case it gets the next free sequential number
// with its own extension.
//
// The final names are a permutation of the original ones, so renaming in
// place could overwrite a file that has not been handled yet. The run is
// therefore split in two phases:
//
// 1. STAGE:  move every file, in sort order, into a freshly created scratch
//            directory as `temp_{index}{ext}`. The index makes these names
//            collision-free.
// 2. COMMIT: in the same order, pick each file's final name and move it back.
//
// The scratch directory is removed only when it ends up empty, so anything
// left behind after a failure can be recovered by hand.
//
// Failure policy:
// - A staging failure aborts the run. Files already staged are moved back to
//   their original paths (in reverse order) and `StagingFailed` is returned.
// - A commit failure is logged and recorded; the file stays in the scratch
//   directory and the remaining files are still committed.
//
// Two runs against the same directory at the same time are not supported:
// they race on final names.

mod names;
mod report;

pub use names::{Assignment, FileEntry, Renamer, plan_final_names};
pub use report::{RenameFailure, RenameKind, RenameOutcome, RenameReport};

use crate::config::{DEFAULT_RENAME_EXTENSIONS, DEFAULT_SCRATCH_DIR_NAME, extension_list};
use crate::discovery::find_files_with_extensions;
use crate::error::{CoreError, CoreResult};

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Upper bound on `temp_rename.N` suffixes tried before giving up.
const MAX_SCRATCH_ATTEMPTS: u32 = 1000;

/// A file moved into the scratch directory during the stage phase.
#[derive(Debug, Clone)]
struct StagedFile {
    temp_path: PathBuf,
    entry: FileEntry,
}

/// Renames the video files in `directory` using the default extension list
/// when `extensions` is `None`.
///
/// # Examples
///
/// ```rust,no_run
/// use resegment_core::rename::rename_all;
/// use std::path::Path;
///
/// let report = rename_all(Path::new("output_videos"), None).unwrap();
/// println!(
///     "{} kept, {} renumbered",
///     report.kept_count(),
///     report.renumbered_count()
/// );
/// ```
pub fn rename_all(directory: &Path, extensions: Option<&[String]>) -> CoreResult<RenameReport> {
    let defaults;
    let extensions = match extensions {
        Some(exts) => exts,
        None => {
            defaults = extension_list(DEFAULT_RENAME_EXTENSIONS);
            &defaults
        }
    };
    rename_all_in(directory, extensions, DEFAULT_SCRATCH_DIR_NAME)
}

/// Renames the files in `directory` matching `extensions`, staging through a
/// scratch directory based on `scratch_name`.
pub fn rename_all_in(
    directory: &Path,
    extensions: &[String],
    scratch_name: &str,
) -> CoreResult<RenameReport> {
    let entries = scan(directory, extensions)?;
    let mut report = RenameReport::empty(directory.to_path_buf());

    if entries.is_empty() {
        log::info!("No video files found in {}", directory.display());
        return Ok(report);
    }

    report.files_found = entries.len();
    log::info!("Found {} video files to process", entries.len());

    let mut occupied = occupied_names(directory, &entries)?;
    let scratch = create_scratch_dir(directory, scratch_name)?;
    if let Some(name) = scratch.file_name() {
        occupied.insert(name.to_string_lossy().into_owned());
    }
    report.scratch_dir = Some(scratch.clone());

    // STAGE
    let staged = match stage(&entries, &scratch) {
        Ok(staged) => staged,
        Err(err) => {
            remove_dir_if_empty(&scratch);
            return Err(err);
        }
    };

    // COMMIT
    let mut renamer = Renamer::with_occupied(occupied);
    for file in &staged {
        commit(&mut renamer, file, directory, &mut report);
    }

    report.scratch_removed = remove_dir_if_empty(&scratch);
    if !report.scratch_removed {
        log::warn!(
            "Scratch directory {} still holds files that could not be renamed",
            scratch.display()
        );
    }

    Ok(report)
}

/// Computes what `rename_all_in` would do without touching the filesystem.
pub fn plan_renames(directory: &Path, extensions: &[String]) -> CoreResult<RenameReport> {
    let entries = scan(directory, extensions)?;
    let mut report = RenameReport::empty(directory.to_path_buf());
    report.dry_run = true;
    report.files_found = entries.len();

    if entries.is_empty() {
        log::info!("No video files found in {}", directory.display());
        return Ok(report);
    }

    let occupied = occupied_names(directory, &entries)?;
    let plan = plan_final_names(&entries, occupied);
    for (entry, assignment) in entries.iter().zip(plan) {
        report.outcomes.push(outcome(entry, &assignment, directory));
    }
    Ok(report)
}

/// Discovers candidate files in processing order.
fn scan(directory: &Path, extensions: &[String]) -> CoreResult<Vec<FileEntry>> {
    find_files_with_extensions(directory, extensions)?
        .iter()
        .map(|path| FileEntry::from_path(path))
        .collect()
}

/// Exact names of everything in `directory` that is not being renamed.
/// Final names must avoid them or the move would clobber an unrelated entry.
/// On a case-insensitive filesystem `commit` also catches case variants.
fn occupied_names(directory: &Path, entries: &[FileEntry]) -> CoreResult<HashSet<String>> {
    let ours: HashSet<&Path> = entries.iter().map(|e| e.path.as_path()).collect();
    let mut occupied = HashSet::new();

    for dir_entry in fs::read_dir(directory)? {
        let path = dir_entry?.path();
        if ours.contains(path.as_path()) {
            continue;
        }
        if let Some(name) = path.file_name() {
            occupied.insert(name.to_string_lossy().into_owned());
        }
    }
    Ok(occupied)
}

/// Creates a new, empty scratch directory inside `directory`: `base` if that
/// name is free, else `base.1`, `base.2`, ...
fn create_scratch_dir(directory: &Path, base: &str) -> CoreResult<PathBuf> {
    for attempt in 0..MAX_SCRATCH_ATTEMPTS {
        let name = if attempt == 0 {
            base.to_string()
        } else {
            format!("{base}.{attempt}")
        };
        let path = directory.join(name);
        match fs::create_dir(&path) {
            Ok(()) => {
                log::debug!("Created scratch directory {}", path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(CoreError::PathError(format!(
                    "Failed to create scratch directory '{}': {}",
                    path.display(),
                    e
                )));
            }
        }
    }
    Err(CoreError::OperationFailed(format!(
        "No free scratch directory name based on '{base}' in {}",
        directory.display()
    )))
}

fn stage(entries: &[FileEntry], scratch: &Path) -> CoreResult<Vec<StagedFile>> {
    let mut staged: Vec<StagedFile> = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let temp_path = scratch.join(format!("temp_{index}{}", entry.extension));
        if let Err(source) = fs::rename(&entry.path, &temp_path) {
            log::error!(
                "Error during renaming: could not stage {}: {source}",
                entry.path.display()
            );
            rollback(&staged);
            return Err(CoreError::StagingFailed {
                path: entry.path.clone(),
                source,
            });
        }
        log::debug!("Staged {} as {}", entry.path.display(), temp_path.display());
        staged.push(StagedFile {
            temp_path,
            entry: entry.clone(),
        });
    }

    Ok(staged)
}

/// Moves staged files back to where they came from, newest first. Returns
/// how many could not be restored.
fn rollback(staged: &[StagedFile]) -> usize {
    let mut stranded = 0;
    for file in staged.iter().rev() {
        match fs::rename(&file.temp_path, &file.entry.path) {
            Ok(()) => log::debug!("Restored {}", file.entry.path.display()),
            Err(e) => {
                stranded += 1;
                log::error!(
                    "Could not restore {} from {}: {e}",
                    file.entry.path.display(),
                    file.temp_path.display()
                );
            }
        }
    }
    stranded
}

fn commit(renamer: &mut Renamer, file: &StagedFile, directory: &Path, report: &mut RenameReport) {
    let (assignment, target) = loop {
        let assignment = renamer.assign(&file.entry);
        let target = directory.join(assignment.name());
        // Something the scan did not see answers to this name.
        if fs::symlink_metadata(&target).is_ok() {
            log::debug!("{} already exists, trying another name", target.display());
            renamer.occupy(assignment.name());
            continue;
        }
        break (assignment, target);
    };

    match fs::rename(&file.temp_path, &target) {
        Ok(()) => {
            renamer.confirm(assignment.name());
            if assignment.is_renumbered() {
                log::info!("Renamed duplicate to: {}", assignment.name());
            } else {
                log::info!("Kept original name: {}", assignment.name());
            }
            report.outcomes.push(outcome(&file.entry, &assignment, directory));
        }
        Err(e) => {
            log::warn!(
                "Error during renaming {} to {}: {e}",
                file.temp_path.display(),
                target.display()
            );
            report.failures.push(RenameFailure {
                source: file.entry.path.clone(),
                staged_path: file.temp_path.clone(),
                target,
                message: e.to_string(),
            });
        }
    }
}

fn outcome(entry: &FileEntry, assignment: &Assignment, directory: &Path) -> RenameOutcome {
    RenameOutcome {
        source: entry.path.clone(),
        final_path: directory.join(assignment.name()),
        kind: if assignment.is_renumbered() {
            RenameKind::Renumbered
        } else {
            RenameKind::Kept
        },
    }
}

/// Removes `dir` if it exists and is empty. Returns whether it is gone.
fn remove_dir_if_empty(dir: &Path) -> bool {
    let is_empty = match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return true,
        Err(e) => {
            log::warn!("Could not inspect {}: {e}", dir.display());
            return false;
        }
    };

    if !is_empty {
        return false;
    }
    match fs::remove_dir(dir) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not remove {}: {e}", dir.display());
            false
        }
    }
}
