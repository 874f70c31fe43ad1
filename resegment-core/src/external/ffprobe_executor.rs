//! FFprobe integration for reading fragment durations.
//!
//! The `DurationProber` trait is the second collaborator of the pipeline: given
//! a media file it returns the container duration in seconds. A missing or
//! non-numeric duration is an error for that file only.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Reports the duration of a media file in seconds.
pub trait DurationProber {
    fn probe_duration(&self, path: &Path) -> CoreResult<f64>;
}

/// `DurationProber` backed by the ffprobe crate (`format.duration`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeDurationProber;

impl FfprobeDurationProber {
    pub fn new() -> Self {
        Self
    }
}

impl DurationProber for FfprobeDurationProber {
    fn probe_duration(&self, path: &Path) -> CoreResult<f64> {
        log::debug!("Running ffprobe (via crate) for duration on: {}", path.display());
        let metadata = ffprobe(path).map_err(|err| {
            log::error!("ffprobe failed for duration on {}: {:?}", path.display(), err);
            map_ffprobe_error(err, "duration")
        })?;

        let raw = metadata.format.duration.unwrap_or_default();
        parse_duration(path, &raw)
    }
}

/// Parses a duration as printed by ffprobe ("119.987000"). Anything that is
/// not a finite, non-negative number is a `DurationParse` error.
pub fn parse_duration(path: &Path, raw: &str) -> CoreResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| CoreError::DurationParse {
            path: path.to_path_buf(),
            raw: raw.to_string(),
        })
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error("ffprobe", io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error("ffprobe", output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("{context} output deserialization: {err}"))
        }
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}
