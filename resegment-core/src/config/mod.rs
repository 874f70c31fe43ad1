//! Configuration structures and constants for the resegment-core library.
//!
//! This module provides the configuration for a batch run: where sources are
//! read from and fragments written to, how long fragments are, which short
//! fragments are dropped, and which extensions the renamer considers.

mod builder;

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

pub use builder::CoreConfigBuilder;

// Default constants

/// Length of each fragment produced by the splitter, in seconds.
pub const DEFAULT_SEGMENT_DURATION_SECS: u64 = 120;

/// Fragments shorter than this many seconds are deleted after splitting.
pub const DEFAULT_MIN_SEGMENT_DURATION_SECS: f64 = 50.0;

/// Directory the splitter writes fragments into (relative to the working directory).
pub const DEFAULT_OUTPUT_DIR: &str = "output_videos";

/// Source containers picked up by the pipeline.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mov", ".mkv"];

/// Containers the renamer considers when no extension list is given.
pub const DEFAULT_RENAME_EXTENSIONS: &[&str] =
    &[".mp4", ".avi", ".mov", ".mkv", ".flv", ".wmv", ".webm"];

/// Base name of the scratch directory used while staging renames.
pub const DEFAULT_SCRATCH_DIR_NAME: &str = "temp_rename";

/// Converts a static extension list into the owned form stored in `CoreConfig`.
pub fn extension_list(extensions: &[&str]) -> Vec<String> {
    extensions.iter().map(|ext| (*ext).to_string()).collect()
}

/// Main configuration structure for the resegment-core library.
///
/// All fields have defaults matching the stock pipeline; the builder is the
/// usual way to override a few of them.
///
/// # Examples
///
/// ```rust
/// use resegment_core::config::CoreConfigBuilder;
/// use std::time::Duration;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir("/videos")
///     .output_dir("/videos/output_videos")
///     .segment_duration_secs(60)
///     .min_segment_duration_secs(20.0)
///     .tool_timeout(Duration::from_secs(600))
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory scanned (top level only) for source videos
    pub input_dir: PathBuf,

    /// Directory receiving fragments; the renamer runs over it at the end
    pub output_dir: PathBuf,

    /// Fragment length handed to the splitter
    pub segment_duration_secs: u64,

    /// Fragments with a probed duration below this are deleted
    pub min_segment_duration_secs: f64,

    /// Suffixes (with leading dot, case-sensitive) of source files
    pub source_extensions: Vec<String>,

    /// Suffixes (with leading dot, case-sensitive) the renamer considers
    pub rename_extensions: Vec<String>,

    /// Name of the per-run scratch directory created inside `output_dir`
    pub scratch_dir_name: String,

    /// Whether a source file is deleted once it has been split and filtered
    pub delete_originals: bool,

    /// Upper bound on a single splitter invocation. `None` waits forever.
    pub tool_timeout: Option<Duration>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            segment_duration_secs: DEFAULT_SEGMENT_DURATION_SECS,
            min_segment_duration_secs: DEFAULT_MIN_SEGMENT_DURATION_SECS,
            source_extensions: extension_list(DEFAULT_SOURCE_EXTENSIONS),
            rename_extensions: extension_list(DEFAULT_RENAME_EXTENSIONS),
            scratch_dir_name: DEFAULT_SCRATCH_DIR_NAME.to_string(),
            delete_originals: true,
            tool_timeout: None,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration with default settings for the given directories.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ..Self::default()
        }
    }

    /// Checks the values that would otherwise fail deep inside a run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.segment_duration_secs == 0 {
            return Err(CoreError::Config(
                "segment duration must be at least 1 second".to_string(),
            ));
        }

        if !self.min_segment_duration_secs.is_finite() || self.min_segment_duration_secs < 0.0 {
            return Err(CoreError::Config(format!(
                "minimum segment duration must be a non-negative number, got {}",
                self.min_segment_duration_secs
            )));
        }

        validate_extensions("source", &self.source_extensions)?;
        validate_extensions("rename", &self.rename_extensions)?;

        if self.scratch_dir_name.is_empty()
            || self.scratch_dir_name == "."
            || self.scratch_dir_name == ".."
            || self.scratch_dir_name.contains(['/', '\\'])
        {
            return Err(CoreError::Config(format!(
                "scratch directory name '{}' must be a plain directory name",
                self.scratch_dir_name
            )));
        }

        if self.tool_timeout.is_some_and(|t| t.is_zero()) {
            return Err(CoreError::Config("tool timeout must be non-zero".to_string()));
        }

        Ok(())
    }
}

fn validate_extensions(kind: &str, extensions: &[String]) -> CoreResult<()> {
    if extensions.is_empty() {
        return Err(CoreError::Config(format!("{kind} extension list is empty")));
    }
    for ext in extensions {
        if ext.len() < 2 || !ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(CoreError::Config(format!(
                "{kind} extension '{ext}' must look like '.mp4'"
            )));
        }
    }
    Ok(())
}
