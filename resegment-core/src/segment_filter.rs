//! Dropping fragments that are too short to be useful.
//!
//! The splitter always leaves a trailing fragment holding whatever remained
//! of the source. Fragments whose probed duration is below the threshold are
//! deleted; the rest are kept untouched.

use crate::config::DEFAULT_MIN_SEGMENT_DURATION_SECS;
use crate::error::CoreResult;
use crate::external::DurationProber;

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Keep/discard decision for one fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentDecision {
    pub path: PathBuf,
    pub duration_secs: f64,
    pub kept: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentFilter {
    min_duration_secs: f64,
}

impl Default for SegmentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SEGMENT_DURATION_SECS)
    }
}

impl SegmentFilter {
    pub fn new(min_duration_secs: f64) -> Self {
        Self { min_duration_secs }
    }

    /// A fragment survives when its duration reaches the threshold.
    pub fn keeps(&self, duration_secs: f64) -> bool {
        duration_secs >= self.min_duration_secs
    }

    /// Probes `fragment` and deletes it if it is too short.
    ///
    /// Probe and parse errors are returned as-is: the fragment is left on disk
    /// and no decision is made for it.
    pub fn apply<P>(&self, prober: &P, fragment: &Path) -> CoreResult<FragmentDecision>
    where
        P: DurationProber + ?Sized,
    {
        let duration_secs = prober.probe_duration(fragment)?;
        let kept = self.keeps(duration_secs);

        if kept {
            log::info!(
                "Kept {} with duration {duration_secs} seconds",
                fragment.display()
            );
        } else {
            fs::remove_file(fragment)?;
            log::info!(
                "Removed {} due to short duration ({duration_secs} seconds)",
                fragment.display()
            );
        }

        Ok(FragmentDecision {
            path: fragment.to_path_buf(),
            duration_secs,
            kept,
        })
    }

    /// Applies the filter to every fragment in order, stopping at the first
    /// error.
    pub fn filter_all<P>(&self, prober: &P, fragments: &[PathBuf]) -> CoreResult<Vec<FragmentDecision>>
    where
        P: DurationProber + ?Sized,
    {
        fragments
            .iter()
            .map(|fragment| self.apply(prober, fragment))
            .collect()
    }
}
