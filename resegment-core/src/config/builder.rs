// ============================================================================
// resegment-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// This module implements the builder pattern for the CoreConfig structure,
// providing a fluent API for creating CoreConfig instances. Every field
// starts at its default, so callers only set what they override.

// ---- Standard library imports ----
use std::path::PathBuf;
use std::time::Duration;

// ---- Internal crate imports ----
use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use resegment_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir("/path/to/input")
///     .output_dir("/path/to/output")
///     .rename_extensions([".mp4", ".MP4"])
///     .delete_originals(false)
///     .build();
/// assert_eq!(config.rename_extensions, vec![".mp4", ".MP4"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory scanned for source videos.
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    /// Sets the directory fragments are written to and renamed in.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Sets the fragment length in seconds.
    pub fn segment_duration_secs(mut self, secs: u64) -> Self {
        self.config.segment_duration_secs = secs;
        self
    }

    /// Sets the minimum duration a fragment needs to be kept.
    pub fn min_segment_duration_secs(mut self, secs: f64) -> Self {
        self.config.min_segment_duration_secs = secs;
        self
    }

    /// Replaces the source extension list.
    pub fn source_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.source_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the extension list used by the renamer.
    pub fn rename_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.rename_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the base name of the staging directory.
    pub fn scratch_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.scratch_dir_name = name.into();
        self
    }

    /// Sets whether sources are deleted after a successful split.
    pub fn delete_originals(mut self, delete: bool) -> Self {
        self.config.delete_originals = delete;
        self
    }

    /// Bounds each splitter invocation.
    pub fn tool_timeout(mut self, timeout: Duration) -> Self {
        self.config.tool_timeout = Some(timeout);
        self
    }

    /// Sets or clears the splitter timeout.
    pub fn tool_timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        self.config.tool_timeout = timeout;
        self
    }

    /// Builds the CoreConfig. Call `CoreConfig::validate` before using it.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_only_what_is_set() {
        let config = CoreConfigBuilder::new()
            .output_dir("out")
            .segment_duration_secs(30)
            .build();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.segment_duration_secs, 30);
        assert_eq!(config.input_dir, PathBuf::from("."));
        assert_eq!(config.min_segment_duration_secs, 50.0);
    }

    #[test]
    fn timeout_can_be_cleared() {
        let config = CoreConfigBuilder::new()
            .tool_timeout(Duration::from_secs(5))
            .tool_timeout_opt(None)
            .build();
        assert!(config.tool_timeout.is_none());
    }
}
