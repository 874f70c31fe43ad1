//! Core library for splitting videos into fixed-length segments and renaming
//! the results without name conflicts.
//!
//! The crate provides source discovery, thin wrappers over ffmpeg/ffprobe, a
//! filter that drops short trailing fragments, and a two-phase renamer that
//! keeps original names where it can and falls back to sequential numbers.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use resegment_core::config::CoreConfigBuilder;
//! use resegment_core::external::{FfmpegSplitter, FfprobeDurationProber};
//! use resegment_core::{find_processable_files, process_videos};
//!
//! let config = CoreConfigBuilder::new()
//!     .input_dir("/path/to/input")
//!     .output_dir("/path/to/input/output_videos")
//!     .build();
//! config.validate().unwrap();
//!
//! let files = find_processable_files(&config.input_dir, &config.source_extensions).unwrap();
//! let summary = process_videos(
//!     &FfmpegSplitter::new().with_timeout(config.tool_timeout),
//!     &FfprobeDurationProber::new(),
//!     &config,
//!     &files,
//! )
//! .unwrap();
//! println!("{:?}", summary.status());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod rename;
pub mod segment_filter;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use discovery::{find_files_with_extensions, find_processable_files};
pub use error::{CoreError, CoreResult};
pub use processing::{RunStatus, RunSummary, SourceResult, SplitReport, process_videos, split_video};
pub use rename::{RenameKind, RenameReport, plan_renames, rename_all, rename_all_in};
pub use segment_filter::{FragmentDecision, SegmentFilter};
