//! Name assignment for the renamer: per-file entries and the state that
//! decides which final name each one gets.
//!
//! Assignment never touches the filesystem. `Renamer::assign` proposes a name,
//! the caller performs the move, and `Renamer::confirm` records the name as
//! used. Planning a dry run is the same loop with the move left out.

use crate::error::{CoreError, CoreResult};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One file considered by the renamer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Where the file was found
    pub path: PathBuf,
    /// File name without the extension
    pub base_name: String,
    /// Extension with its leading dot, case as found; empty if there is none
    pub extension: String,
}

impl FileEntry {
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
            CoreError::PathError(format!("Not a valid UTF-8 file name: {}", path.display()))
        })?;

        let as_path = Path::new(name);
        let base_name = as_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name)
            .to_string();
        let extension = as_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            base_name,
            extension,
        })
    }

    /// The name the file would keep if nothing else claimed it.
    pub fn original_name(&self) -> String {
        format!("{}{}", self.base_name, self.extension)
    }
}

/// Final name chosen for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// The original name was free
    Keep(String),
    /// The original name was taken; a sequential number was used instead
    Renumber(String),
}

impl Assignment {
    pub fn name(&self) -> &str {
        match self {
            Assignment::Keep(name) | Assignment::Renumber(name) => name,
        }
    }

    pub fn is_renumbered(&self) -> bool {
        matches!(self, Assignment::Renumber(_))
    }
}

/// Naming state for one rename run.
///
/// `processed` holds the lowercase names handed out so far and is compared
/// case-insensitively. `occupied` holds the exact names of directory entries
/// that are not part of the run. `next_number` is the next sequential number
/// to try. All three only grow.
#[derive(Debug, Clone)]
pub struct Renamer {
    processed: HashSet<String>,
    occupied: HashSet<String>,
    next_number: u64,
}

impl Default for Renamer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renamer {
    pub fn new() -> Self {
        Self::with_occupied(HashSet::new())
    }

    /// Starts a run in a directory that already holds entries named
    /// `occupied` (exact names) which must not be overwritten.
    pub fn with_occupied(occupied: HashSet<String>) -> Self {
        Self {
            processed: HashSet::new(),
            occupied,
            next_number: 1,
        }
    }

    /// True if `name` was handed out already (ignoring case) or belongs to
    /// an unrelated entry (exact match).
    pub fn is_taken(&self, name: &str) -> bool {
        self.processed.contains(&name.to_lowercase()) || self.occupied.contains(name)
    }

    /// Marks `name` as held by an entry outside the run.
    pub fn occupy(&mut self, name: &str) {
        self.occupied.insert(name.to_string());
    }

    /// Picks the final name for `entry`.
    ///
    /// The original name wins if it is free. Otherwise numbers are tried from
    /// the cursor upwards; every number tried advances the cursor, including
    /// the one that succeeds.
    pub fn assign(&mut self, entry: &FileEntry) -> Assignment {
        let original = entry.original_name();
        if !self.is_taken(&original) {
            return Assignment::Keep(original);
        }

        loop {
            let numbered = format!("{}{}", self.next_number, entry.extension);
            self.next_number += 1;
            if !self.is_taken(&numbered) {
                return Assignment::Renumber(numbered);
            }
        }
    }

    /// Records `final_name` as used once the file is actually in place.
    pub fn confirm(&mut self, final_name: &str) {
        self.processed.insert(final_name.to_lowercase());
    }
}

/// Plans the final names for `entries` (already in processing order) without
/// moving anything.
pub fn plan_final_names(entries: &[FileEntry], occupied: HashSet<String>) -> Vec<Assignment> {
    let mut renamer = Renamer::with_occupied(occupied);
    entries
        .iter()
        .map(|entry| {
            let assignment = renamer.assign(entry);
            renamer.confirm(assignment.name());
            assignment
        })
        .collect()
}
