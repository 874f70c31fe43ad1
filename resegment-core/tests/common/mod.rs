// resegment-core/tests/common/mod.rs
//
// Fake collaborators for exercising the pipeline without ffmpeg/ffprobe.

#![allow(dead_code)]

use resegment_core::error::{CoreError, CoreResult};
use resegment_core::external::{DurationProber, MediaSplitter, source_stem_and_ext};

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// How the fake splitter behaves for a given source file name.
#[derive(Debug, Clone, Copy)]
pub enum SplitBehavior {
    /// Writes this many fragments
    Fragments(usize),
    /// Exits non-zero without writing anything
    Fail,
    /// Behaves as if ffmpeg is not installed
    Missing,
}

/// Writes empty `{stem}_partNNN{ext}` files the way ffmpeg's segment muxer
/// names them.
#[derive(Default)]
pub struct FakeSplitter {
    behaviors: HashMap<String, SplitBehavior>,
    default_fragments: usize,
    calls: RefCell<Vec<PathBuf>>,
}

impl FakeSplitter {
    pub fn new(default_fragments: usize) -> Self {
        Self {
            default_fragments,
            ..Self::default()
        }
    }

    pub fn with(mut self, source_name: &str, behavior: SplitBehavior) -> Self {
        self.behaviors.insert(source_name.to_string(), behavior);
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl MediaSplitter for FakeSplitter {
    fn split(&self, input: &Path, _segment_secs: u64, output_dir: &Path) -> CoreResult<()> {
        self.calls.borrow_mut().push(input.to_path_buf());
        let name = input.file_name().unwrap().to_string_lossy().into_owned();
        let behavior = self
            .behaviors
            .get(&name)
            .copied()
            .unwrap_or(SplitBehavior::Fragments(self.default_fragments));

        match behavior {
            SplitBehavior::Fragments(count) => {
                let (stem, ext) = source_stem_and_ext(input)?;
                for index in 0..count {
                    File::create(output_dir.join(format!("{stem}_part{index:03}{ext}")))?;
                }
                Ok(())
            }
            SplitBehavior::Fail => Err(CoreError::CommandFailed(
                "ffmpeg".to_string(),
                exit_status(1),
                "Invalid data found when processing input".to_string(),
            )),
            SplitBehavior::Missing => Err(CoreError::DependencyNotFound("ffmpeg".to_string())),
        }
    }
}

/// Reports canned durations keyed by file name; unknown files are 120 s.
#[derive(Default)]
pub struct FakeProber {
    durations: HashMap<String, f64>,
    unparseable: HashSet<String>,
}

impl FakeProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, file_name: &str, secs: f64) -> Self {
        self.durations.insert(file_name.to_string(), secs);
        self
    }

    pub fn unparseable(mut self, file_name: &str) -> Self {
        self.unparseable.insert(file_name.to_string());
        self
    }
}

impl DurationProber for FakeProber {
    fn probe_duration(&self, path: &Path) -> CoreResult<f64> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        if self.unparseable.contains(&name) {
            return resegment_core::external::parse_duration(path, "N/A");
        }
        Ok(self.durations.get(&name).copied().unwrap_or(120.0))
    }
}

/// A process exit status carrying `code`.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap();
    path
}

/// Sorted names of everything directly inside `dir`.
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
