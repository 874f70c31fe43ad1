// ============================================================================
// resegment-core/src/processing.rs
// ============================================================================
//
// PROCESSING: The Split -> Filter -> Delete -> Rename Pipeline
//
// For each source video the splitter cuts fixed-length fragments into the
// output directory and the segment filter deletes the ones that are too
// short. A source is deleted only after both steps succeed. Once every source
// has been handled, the renamer runs once over the output directory.
//
// A failure on one source is logged and recorded, and the batch moves on.
// Two conditions stop the batch: a missing external tool (every remaining
// source would fail the same way) and a staging failure in the renamer.

use crate::config::CoreConfig;
use crate::discovery::fragment_paths;
use crate::error::{CoreError, CoreResult};
use crate::external::{DurationProber, MediaSplitter, ensure_dir, source_stem_and_ext};
use crate::rename::{RenameReport, rename_all_in};
use crate::segment_filter::{FragmentDecision, SegmentFilter};

use log::{error, info, warn};
use serde::Serialize;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Fragments produced for one source and what the filter decided for each.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitReport {
    pub source: PathBuf,
    pub fragments: Vec<FragmentDecision>,
}

impl SplitReport {
    pub fn kept(&self) -> impl Iterator<Item = &FragmentDecision> {
        self.fragments.iter().filter(|f| f.kept)
    }

    pub fn discarded(&self) -> impl Iterator<Item = &FragmentDecision> {
        self.fragments.iter().filter(|f| !f.kept)
    }
}

/// What happened to one source file during a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceResult {
    pub source: PathBuf,
    pub split: Option<SplitReport>,
    pub original_deleted: bool,
    pub error: Option<String>,
}

impl SourceResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every source was split and every fragment renamed
    Success,
    /// At least one source or rename failed; the rest went through
    PartialFailure,
}

/// Outcome of `process_videos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub sources: Vec<SourceResult>,
    pub rename: Option<RenameReport>,
    pub elapsed_secs: f64,
}

impl RunSummary {
    pub fn failed_sources(&self) -> usize {
        self.sources.iter().filter(|s| !s.is_ok()).count()
    }

    pub fn fragments_kept(&self) -> usize {
        self.split_reports().map(|r| r.kept().count()).sum()
    }

    pub fn fragments_discarded(&self) -> usize {
        self.split_reports().map(|r| r.discarded().count()).sum()
    }

    pub fn originals_deleted(&self) -> usize {
        self.sources.iter().filter(|s| s.original_deleted).count()
    }

    pub fn status(&self) -> RunStatus {
        let rename_clean = self.rename.as_ref().is_none_or(RenameReport::is_clean);
        if self.failed_sources() == 0 && rename_clean {
            RunStatus::Success
        } else {
            RunStatus::PartialFailure
        }
    }

    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::OperationFailed(format!("Failed to serialize run summary: {e}")))
    }

    fn split_reports(&self) -> impl Iterator<Item = &SplitReport> {
        self.sources.iter().filter_map(|s| s.split.as_ref())
    }
}

/// Splits `input` into the output directory and filters the fragments.
///
/// The source itself is left alone; deleting it is up to the caller.
pub fn split_video<S, P>(
    splitter: &S,
    prober: &P,
    config: &CoreConfig,
    input: &Path,
) -> CoreResult<SplitReport>
where
    S: MediaSplitter + ?Sized,
    P: DurationProber + ?Sized,
{
    ensure_dir(&config.output_dir)?;
    info!(
        "Splitting {} into {}-second segments",
        input.display(),
        config.segment_duration_secs
    );
    splitter.split(input, config.segment_duration_secs, &config.output_dir)?;

    let (stem, ext) = source_stem_and_ext(input)?;
    let fragments = fragment_paths(&config.output_dir, &stem, &ext)?;
    if fragments.is_empty() {
        warn!("No fragments were produced for {}", input.display());
    }

    let filter = SegmentFilter::new(config.min_segment_duration_secs);
    let decisions = filter.filter_all(prober, &fragments)?;

    info!(
        "Successfully split {} into {}-second segments",
        input.display(),
        config.segment_duration_secs
    );
    Ok(SplitReport {
        source: input.to_path_buf(),
        fragments: decisions,
    })
}

/// Runs the whole pipeline over `files_to_process`, then renames the output
/// directory once.
///
/// The function is generic over the two external collaborators so tests can
/// run it without ffmpeg installed.
///
/// # Examples
///
/// ```rust,no_run
/// use resegment_core::external::{FfmpegSplitter, FfprobeDurationProber};
/// use resegment_core::{CoreConfig, find_processable_files, process_videos};
///
/// let config = CoreConfig::default();
/// let files = find_processable_files(&config.input_dir, &config.source_extensions).unwrap();
/// let summary = process_videos(
///     &FfmpegSplitter::new(),
///     &FfprobeDurationProber::new(),
///     &config,
///     &files,
/// )
/// .unwrap();
/// println!("{} fragments kept", summary.fragments_kept());
/// ```
pub fn process_videos<S, P>(
    splitter: &S,
    prober: &P,
    config: &CoreConfig,
    files_to_process: &[PathBuf],
) -> CoreResult<RunSummary>
where
    S: MediaSplitter + ?Sized,
    P: DurationProber + ?Sized,
{
    config.validate()?;
    let start = Instant::now();
    let mut sources = Vec::with_capacity(files_to_process.len());

    for input in files_to_process {
        match split_video(splitter, prober, config, input) {
            Ok(split) => {
                let mut result = SourceResult {
                    source: input.clone(),
                    split: Some(split),
                    original_deleted: false,
                    error: None,
                };
                if config.delete_originals {
                    match fs::remove_file(input) {
                        Ok(()) => {
                            info!("Deleted original video file: {}", input.display());
                            result.original_deleted = true;
                        }
                        Err(e) => {
                            warn!("Failed to delete original {}: {e}", input.display());
                            result.error = Some(format!("failed to delete original: {e}"));
                        }
                    }
                }
                sources.push(result);
            }
            Err(e) if e.is_tool_missing() => {
                error!("{e}; aborting the batch");
                return Err(e);
            }
            Err(e) => {
                warn!("Error occurred while processing {}: {e}", input.display());
                sources.push(SourceResult {
                    source: input.clone(),
                    split: None,
                    original_deleted: false,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let rename = if files_to_process.is_empty() {
        None
    } else {
        info!("Renaming all output videos sequentially...");
        let report = rename_all_in(
            &config.output_dir,
            &config.rename_extensions,
            &config.scratch_dir_name,
        )?;
        info!("Video renaming complete!");
        Some(report)
    };

    Ok(RunSummary {
        sources,
        rename,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}
