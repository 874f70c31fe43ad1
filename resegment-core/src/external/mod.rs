// ============================================================================
// resegment-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with External CLI Tools and File System
//
// This module encapsulates everything resegment does not do itself: running
// ffmpeg to cut fragments, running ffprobe to measure them, and a couple of
// filesystem primitives. The pipeline only sees the two traits, so tests can
// swap in fakes that write files and report canned durations.
//
// KEY COMPONENTS:
// - MediaSplitter / FfmpegSplitter (ffmpeg-sidecar)
// - DurationProber / FfprobeDurationProber (ffprobe crate)
// - check_dependency: up-front check that a tool is on PATH
// - ensure_dir: idempotent directory creation

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Splitting media files into fixed-length fragments with ffmpeg
pub mod ffmpeg_executor;

/// Reading media durations with ffprobe
pub mod ffprobe_executor;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{
    FfmpegSplitter, MediaSplitter, build_split_command, fragment_output_pattern,
    source_stem_and_ext,
};
pub use ffprobe_executor::{DurationProber, FfprobeDurationProber, parse_duration};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started, by running it with
/// `-version`.
///
/// # Returns
///
/// * `Ok(())` - The command started (its exit status is not inspected)
/// * `Err(CoreError::DependencyNotFound)` - The command is not on PATH
/// * `Err(CoreError::CommandStart)` - The command exists but could not start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

// ============================================================================
// FILESYSTEM
// ============================================================================

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> CoreResult<()> {
    fs::create_dir_all(dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to create directory '{}': {}",
            dir.display(),
            e
        ))
    })
}
