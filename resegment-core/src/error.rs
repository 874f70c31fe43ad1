// ============================================================================
// resegment-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for resegment-core
//
// Every fallible operation in the library returns `CoreResult<T>`. The
// variants fall into four groups:
//
// - tool-missing:  a required external executable is not on PATH
// - tool-failure:  the executable ran but failed, could not be waited on,
//                  or exceeded its timeout
// - parse-failure: a tool produced output that is not a number
// - filesystem:    create/move/delete failed
//
// Callers that want to keep going after a per-file failure (the batch loop,
// the renamer commit phase) log the error and move on; only tool-missing and
// staging failures are treated as fatal.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Required external tool '{0}' was not found in PATH")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("'{0}' failed with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("'{0}' did not finish within {1} seconds and was killed")]
    CommandTimeout(String, u64),

    #[error("Could not parse duration '{raw}' reported for {}", .path.display())]
    DurationParse { path: PathBuf, raw: String },

    #[error("ffprobe output error: {0}")]
    FfprobeParse(String),

    #[error("Failed to stage {} for renaming: {source}", .path.display())]
    StagingFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No processable video files found")]
    NoFilesFound,

    #[error("{0}")]
    OperationFailed(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// True when the error means an external executable is absent, as opposed
    /// to having run and failed.
    pub fn is_tool_missing(&self) -> bool {
        matches!(self, CoreError::DependencyNotFound(_))
    }
}

/// Maps a spawn failure to `DependencyNotFound` when the binary is missing,
/// otherwise to `CommandStart`.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    let cmd = cmd.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(cmd)
    } else {
        CoreError::CommandStart(cmd, err)
    }
}

pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}
