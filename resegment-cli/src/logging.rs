// ============================================================================
// resegment-cli/src/logging.rs
// ============================================================================
//
// LOGGING: Console and File Output for the CLI
//
// Both crates log through the `log` facade. The CLI installs a `fern`
// dispatcher with two outputs:
//
// - console: bare messages at info level, a `[LEVEL]` prefix otherwise.
//   Warnings and errors go to stderr. Everything else goes to stdout unless
//   stdout is reserved for JSON, in which case it goes to stderr as well.
// - file (optional): every record with a timestamp and target, written to
//   `<log_dir>/resegment_<timestamp>.log`.

use crate::error::{CliErrorContext, CliResult};

use log::{Level, LevelFilter};
use resegment_core::CoreError;

use std::fs;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("resegment_{}.log", resegment_cli::logging::get_timestamp());
/// assert!(log_filename.starts_with("resegment_"));
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Path of the log file for a run started now.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("resegment_{}.log", get_timestamp()))
}

/// Installs the global logger.
///
/// Returns the log file path when `log_dir` is given. Can only succeed once
/// per process.
pub fn init_logging(
    level: LevelFilter,
    log_dir: Option<&Path>,
    console_to_stderr: bool,
) -> CliResult<Option<PathBuf>> {
    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            if record.level() == Level::Info {
                out.finish(format_args!("{message}"))
            } else {
                out.finish(format_args!("[{}] {message}", record.level()))
            }
        })
        .chain(
            fern::Dispatch::new()
                .filter(|meta| meta.level() <= Level::Warn)
                .chain(std::io::stderr()),
        )
        .chain(
            fern::Dispatch::new()
                .filter(|meta| meta.level() > Level::Warn)
                .chain(if console_to_stderr {
                    fern::Output::from(std::io::stderr())
                } else {
                    fern::Output::from(std::io::stdout())
                }),
        );

    let mut dispatch = fern::Dispatch::new()
        .level(level)
        // ffmpeg-sidecar is chatty at debug level
        .level_for("ffmpeg_sidecar", LevelFilter::Warn)
        .chain(console);

    let mut log_path = None;
    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)
            .cli_with_context(|| format!("Failed to create log directory '{}'", dir.display()))?;
        let path = log_file_path(dir);
        let file = fern::log_file(&path)
            .cli_with_context(|| format!("Failed to open log file '{}'", path.display()))?;
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} [{}] {}: {message}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        record.target()
                    ))
                })
                .chain(file),
        );
        log_path = Some(path);
    }

    dispatch
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to initialize logging: {e}")))?;
    Ok(log_path)
}
