//! Results of a rename run.

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameKind {
    Kept,
    Renumbered,
}

/// A file that reached its final name (or would, in a dry run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOutcome {
    pub source: PathBuf,
    pub final_path: PathBuf,
    pub kind: RenameKind,
}

/// A file whose final move failed. It stays in the scratch directory under
/// `staged_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameFailure {
    pub source: PathBuf,
    pub staged_path: PathBuf,
    pub target: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenameReport {
    pub directory: PathBuf,
    pub files_found: usize,
    pub dry_run: bool,
    pub outcomes: Vec<RenameOutcome>,
    pub failures: Vec<RenameFailure>,
    /// Scratch directory used for staging; `None` when nothing was staged
    pub scratch_dir: Option<PathBuf>,
    pub scratch_removed: bool,
}

impl RenameReport {
    pub fn empty(directory: PathBuf) -> Self {
        Self {
            directory,
            ..Self::default()
        }
    }

    pub fn kept_count(&self) -> usize {
        self.count(RenameKind::Kept)
    }

    pub fn renumbered_count(&self) -> usize {
        self.count(RenameKind::Renumbered)
    }

    /// True when every file found reached a final name.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.outcomes.len() == self.files_found
    }

    fn count(&self, kind: RenameKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind == kind).count()
    }
}
