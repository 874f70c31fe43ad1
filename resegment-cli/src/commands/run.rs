//! Implementation of the 'run' subcommand.
//!
//! Resolves directories, builds the core configuration from the flags, checks
//! that ffmpeg and ffprobe are installed, and hands the batch to
//! resegment-core.

use crate::cli::RunArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::output::{self, EXIT_SUCCESS};

use resegment_core::config::{CoreConfig, CoreConfigBuilder, DEFAULT_OUTPUT_DIR};
use resegment_core::external::{FfmpegSplitter, FfprobeDurationProber, check_dependency};
use resegment_core::{CoreError, RunSummary, find_processable_files, process_videos};

use log::{debug, info};

use std::path::PathBuf;
use std::time::Duration;

/// Creates the core configuration from the command-line flags.
pub fn create_core_config(args: &RunArgs) -> CliResult<CoreConfig> {
    let input_dir = args.input_dir.canonicalize().cli_with_context(|| {
        format!("Invalid input directory '{}'", args.input_dir.display())
    })?;
    if !input_dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "Input path '{}' is not a directory",
            input_dir.display()
        )));
    }
    let output_dir: PathBuf = args
        .output_dir
        .clone()
        .unwrap_or_else(|| input_dir.join(DEFAULT_OUTPUT_DIR));

    let config = CoreConfigBuilder::new()
        .input_dir(input_dir)
        .output_dir(output_dir)
        .segment_duration_secs(args.segment_secs)
        .min_segment_duration_secs(args.min_secs)
        .delete_originals(!args.keep_originals)
        .tool_timeout_opt(args.timeout_secs.map(Duration::from_secs))
        .build();
    config.validate()?;
    Ok(config)
}

pub fn run_pipeline(args: RunArgs) -> CliResult<i32> {
    let config = create_core_config(&args)?;

    info!("Input directory: {}", config.input_dir.display());
    info!("Output directory: {}", config.output_dir.display());
    debug!("Configuration: {config:?}");

    let files = match find_processable_files(&config.input_dir, &config.source_extensions) {
        Ok(files) => files,
        Err(CoreError::NoFilesFound) => {
            info!("No video files found in the current directory.");
            if args.json {
                let empty = RunSummary {
                    sources: Vec::new(),
                    rename: None,
                    elapsed_secs: 0.0,
                };
                output::report_run(&empty, true)?;
            }
            return Ok(EXIT_SUCCESS);
        }
        Err(e) => return Err(e),
    };
    info!("Found {} video file(s) to process.", files.len());

    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;
    debug!("External dependency check passed.");

    let splitter = FfmpegSplitter::new().with_timeout(config.tool_timeout);
    let prober = FfprobeDurationProber::new();
    let summary = process_videos(&splitter, &prober, &config, &files)?;

    output::report_run(&summary, args.json)?;
    Ok(output::exit_code(summary.status()))
}
