// resegment-cli/src/output.rs
//
// Run summaries and exit codes. Human-readable output goes through the
// logger so it also lands in the log file; JSON goes straight to stdout.

use log::{info, warn};
use resegment_core::rename::RenameReport;
use resegment_core::{CoreError, RunStatus, RunSummary};

use crate::error::CliResult;

/// Everything went through, or there was nothing to do.
pub const EXIT_SUCCESS: i32 = 0;
/// At least one file failed; the others were processed.
pub const EXIT_PARTIAL_FAILURE: i32 = 1;
/// The run could not start or was aborted.
pub const EXIT_FATAL: i32 = 2;

pub fn exit_code(status: RunStatus) -> i32 {
    match status {
        RunStatus::Success => EXIT_SUCCESS,
        RunStatus::PartialFailure => EXIT_PARTIAL_FAILURE,
    }
}

/// Formats seconds as `1h 02m 03s`, `2m 03s` or `3.2s`.
pub fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        return format!("{secs:.1}s");
    }
    let total = secs.round() as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else {
        format!("{minutes}m {seconds:02}s")
    }
}

pub fn report_run(summary: &RunSummary, json: bool) -> CliResult<()> {
    if json {
        println!("{}", summary.to_json()?);
        return Ok(());
    }

    info!("========================================");
    info!("Run Summary:");
    info!("========================================");
    for source in &summary.sources {
        match (&source.split, &source.error) {
            (_, Some(err)) => warn!("{}: {err}", source.source.display()),
            (Some(split), None) => info!(
                "{}: {} segment(s) kept, {} discarded{}",
                source.source.display(),
                split.kept().count(),
                split.discarded().count(),
                if source.original_deleted { ", original deleted" } else { "" }
            ),
            (None, None) => {}
        }
    }
    info!("----------------------------------------");
    info!(
        "Sources: {} processed, {} failed",
        summary.sources.len() - summary.failed_sources(),
        summary.failed_sources()
    );
    info!(
        "Segments: {} kept, {} discarded",
        summary.fragments_kept(),
        summary.fragments_discarded()
    );
    if let Some(rename) = &summary.rename {
        log_rename_counts(rename);
    }
    info!("Total execution time: {}", format_duration(summary.elapsed_secs));
    if summary.status() == RunStatus::Success {
        info!("All videos processed successfully!");
    } else {
        warn!("Some videos could not be processed; see the messages above.");
    }
    Ok(())
}

pub fn report_rename(report: &RenameReport, json: bool) -> CliResult<()> {
    if json {
        let text = serde_json::to_string_pretty(report).map_err(|e| {
            CoreError::OperationFailed(format!("Failed to serialize rename report: {e}"))
        })?;
        println!("{text}");
        return Ok(());
    }

    if report.dry_run {
        for outcome in &report.outcomes {
            let from = outcome.source.file_name().unwrap_or_default().to_string_lossy();
            let to = outcome.final_path.file_name().unwrap_or_default().to_string_lossy();
            if from == to {
                info!("Would keep: {from}");
            } else {
                info!("Would rename: {from} -> {to}");
            }
        }
    }
    log_rename_counts(report);
    Ok(())
}

fn log_rename_counts(report: &RenameReport) {
    info!(
        "Renaming: {} kept, {} renumbered, {} failed",
        report.kept_count(),
        report.renumbered_count(),
        report.failures.len()
    );
    for failure in &report.failures {
        warn!(
            "{} is still at {}: {}",
            failure.source.display(),
            failure.staged_path.display(),
            failure.message
        );
    }
}
