// ============================================================================
// resegment-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Lossless Re-segmentation Through ffmpeg
//
// This module defines the `MediaSplitter` collaborator and its ffmpeg-backed
// implementation. The splitter stream-copies every input stream into numbered
// fragments of a fixed length, resetting timestamps per fragment, and writes
// them as `{stem}_part%03d{ext}` next to each other in the output directory.
//
// KEY COMPONENTS:
// - MediaSplitter: trait the batch pipeline is generic over
// - FfmpegSplitter: ffmpeg-sidecar implementation with an optional timeout
// - build_split_command: argument construction, kept separate for testing

use crate::error::{
    CoreError, CoreResult, command_failed_error, command_start_error, command_wait_error,
};

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Splits one media file into fixed-length fragments inside `output_dir`.
///
/// Implementations report a missing executable as
/// `CoreError::DependencyNotFound` and a failed run as
/// `CoreError::CommandFailed` so callers can tell the two apart.
pub trait MediaSplitter {
    fn split(&self, input: &Path, segment_secs: u64, output_dir: &Path) -> CoreResult<()>;
}

/// `MediaSplitter` that shells out to ffmpeg's segment muxer.
#[derive(Debug, Clone, Default)]
pub struct FfmpegSplitter {
    timeout: Option<Duration>,
}

impl FfmpegSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kills ffmpeg if a single split runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl MediaSplitter for FfmpegSplitter {
    fn split(&self, input: &Path, segment_secs: u64, output_dir: &Path) -> CoreResult<()> {
        let pattern = fragment_output_pattern(input, output_dir)?;
        let mut cmd = build_split_command(input, segment_secs, &pattern);
        let args: Vec<_> = cmd.get_args().map(|arg| arg.to_string_lossy()).collect();
        log::debug!("Running split command: ffmpeg {}", args.join(" "));

        let child = cmd.spawn().map_err(|e| command_start_error("ffmpeg", e))?;
        let (status, stderr) = run_to_completion(child, self.timeout)?;

        if !status.success() {
            log::error!("ffmpeg exited with {status} while splitting {}", input.display());
            return Err(command_failed_error("ffmpeg", status, stderr));
        }
        Ok(())
    }
}

/// Returns the base name and extension (with its dot, case as found) of a
/// source file. The extension is empty when the name has none.
pub fn source_stem_and_ext(input: &Path) -> CoreResult<(String, String)> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            CoreError::PathError(format!(
                "Failed to get filename stem for {}",
                input.display()
            ))
        })?
        .to_string();
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    Ok((stem, ext))
}

/// `output_dir/{stem}_part%03d{ext}`, the printf-style pattern handed to ffmpeg.
pub fn fragment_output_pattern(input: &Path, output_dir: &Path) -> CoreResult<PathBuf> {
    let (stem, ext) = source_stem_and_ext(input)?;
    Ok(output_dir.join(format!("{stem}_part%03d{ext}")))
}

/// Builds the stream-copy segmenting command.
pub fn build_split_command(input: &Path, segment_secs: u64, output_pattern: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    // Never block on an interactive overwrite prompt.
    cmd.arg("-n");
    cmd.input(input.to_string_lossy().as_ref());
    cmd.args(["-c", "copy"]);
    cmd.args(["-map", "0"]);
    cmd.args(["-segment_time", &segment_secs.to_string()]);
    cmd.args(["-f", "segment"]);
    cmd.args(["-reset_timestamps", "1"]);
    cmd.output(output_pattern.to_string_lossy().as_ref());
    cmd
}

/// Drains ffmpeg's event stream until the process exits, killing it if the
/// optional deadline passes first. Returns the exit status and the error lines
/// ffmpeg printed.
fn run_to_completion(
    mut child: FfmpegChild,
    timeout: Option<Duration>,
) -> CoreResult<(ExitStatus, String)> {
    let events = child.iter().map_err(|e| {
        CoreError::OperationFailed(format!("Failed to read ffmpeg output: {e}"))
    })?;
    let secs = timeout.map(|t| t.as_secs()).unwrap_or_default();

    let child = Mutex::new(child);
    let (stderr, timed_out) = run_with_deadline(
        timeout,
        || {
            log::warn!("ffmpeg exceeded {secs}s, killing it");
            let mut child = child.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = child.kill() {
                log::error!("Failed to kill ffmpeg: {e}");
            }
        },
        || collect_error_lines(events),
    );

    let mut child = child.into_inner().unwrap_or_else(PoisonError::into_inner);
    let status = child.wait().map_err(|e| command_wait_error("ffmpeg", e))?;

    if timed_out {
        return Err(CoreError::CommandTimeout("ffmpeg".to_string(), secs));
    }
    Ok((status, stderr))
}

/// Runs `work` on the current thread. If it is still running once `timeout`
/// has passed, a watchdog thread calls `on_expire` once; `work` is expected
/// to return soon after. Returns the result of `work` and whether the
/// deadline passed.
fn run_with_deadline<T>(
    timeout: Option<Duration>,
    on_expire: impl FnOnce() + Send,
    work: impl FnOnce() -> T,
) -> (T, bool) {
    let Some(limit) = timeout else {
        return (work(), false);
    };

    let (done_tx, done_rx) = mpsc::channel::<()>();
    thread::scope(|scope| {
        let watchdog = scope.spawn(move || match done_rx.recv_timeout(limit) {
            Err(RecvTimeoutError::Timeout) => {
                on_expire();
                true
            }
            _ => false,
        });

        let result = work();
        drop(done_tx);
        let expired = watchdog.join().unwrap_or(false);
        (result, expired)
    })
}

fn collect_error_lines(events: impl Iterator<Item = FfmpegEvent>) -> String {
    let mut lines = Vec::new();
    for event in events {
        match event {
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, msg) | FfmpegEvent::Error(msg) => {
                log::debug!("ffmpeg: {msg}");
                lines.push(msg);
            }
            FfmpegEvent::Log(_, msg) => log::trace!("ffmpeg: {msg}"),
            _ => {}
        }
    }
    lines.join("\n")
}
