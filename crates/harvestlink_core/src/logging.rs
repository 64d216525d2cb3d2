//! File logging bootstrap and panic capture.
//!
//! # Responsibility
//! - Bring up rolling file logs at most once per process.
//! - Keep diagnostic events metadata-only and shell-parseable.
//!
//! # Invariants
//! - Re-running init with the active `level + log_dir` pair is a no-op.
//! - Re-running init with any other configuration is refused.
//! - Nothing in this module panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "harvestlink";
const LOG_ROTATE_BYTES: u64 = 5 * 1024 * 1024;
const LOG_KEEP_FILES: usize = 4;
const PANIC_DETAIL_CHAR_CAP: usize = 200;
const SUPPORTED_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static LOGGER_RUNTIME: OnceCell<LoggerRuntime> = OnceCell::new();
static PANIC_CAPTURE: OnceCell<()> = OnceCell::new();

struct LoggerRuntime {
    level: &'static str,
    directory: PathBuf,
    _handle: LoggerHandle,
}

/// Brings up core logging for the given level and directory.
///
/// On success the process writes size-rotated log files under `log_dir`.
/// Failures come back as human-readable strings so hosts can surface them
/// without unwinding.
///
/// # Invariants
/// - A second call with the active configuration returns `Ok(())`.
/// - A second call with a different level or directory is refused.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error`.
/// - `log_dir` is blank, relative, or cannot be created.
/// - The logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = parse_level(level)?;
    let directory = require_absolute_dir(log_dir)?;

    // First caller wins the bootstrap; later callers fall through to the
    // configuration check against whatever is already running.
    let runtime = LOGGER_RUNTIME.get_or_try_init(|| bring_up(level, directory.clone()))?;
    enforce_same_config(runtime, level, &directory)
}

/// Reports the active logging configuration.
///
/// `None` until `init_logging` has succeeded once.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    let runtime = LOGGER_RUNTIME.get()?;
    Some((runtime.level, runtime.directory.clone()))
}

/// Returns the default log level for the current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn bring_up(level: &'static str, directory: PathBuf) -> Result<LoggerRuntime, String> {
    std::fs::create_dir_all(&directory)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", directory.display()))?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("log level `{level}` was rejected by the backend: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(directory.as_path())
                .basename(LOG_BASENAME),
        )
        .append()
        .rotate(
            Criterion::Size(LOG_ROTATE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_KEEP_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("logger startup failed: {err}"))?;

    install_panic_capture();

    info!(
        "event=core_start module=core status=ok platform={} build={} version={}",
        std::env::consts::OS,
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "event=logging_init module=core status=ok level={level} log_dir={}",
        directory.display()
    );

    Ok(LoggerRuntime {
        level,
        directory,
        _handle: handle,
    })
}

fn enforce_same_config(
    runtime: &LoggerRuntime,
    level: &'static str,
    directory: &Path,
) -> Result<(), String> {
    if runtime.directory != directory {
        return Err(format!(
            "logging is already active at `{}`; re-init with `{}` refused",
            runtime.directory.display(),
            directory.display()
        ));
    }
    if runtime.level != level {
        return Err(format!(
            "logging is already active at level `{}`; re-init with `{level}` refused",
            runtime.level
        ));
    }
    Ok(())
}

fn parse_level(raw: &str) -> Result<&'static str, String> {
    let wanted = raw.trim().to_ascii_lowercase();
    SUPPORTED_LEVELS
        .iter()
        .find(|level| **level == wanted)
        .copied()
        .ok_or_else(|| {
            format!(
                "unknown log level `{}`; supported: {}",
                raw.trim(),
                SUPPORTED_LEVELS.join("|")
            )
        })
}

fn require_absolute_dir(raw: &str) -> Result<PathBuf, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("log directory must not be blank".to_string());
    }
    let path = Path::new(trimmed);
    if path.is_relative() {
        return Err(format!("log directory must be absolute, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn install_panic_capture() {
    PANIC_CAPTURE.get_or_init(|| {
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            error!(
                "event=panic module=core status=error location={location} detail={}",
                describe_panic_payload(panic_info)
            );
            previous_hook(panic_info);
        }));
    });
}

fn describe_panic_payload(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    let text = payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "opaque panic payload".to_owned());

    clamp_for_log(&text, PANIC_DETAIL_CHAR_CAP)
}

// Panic payloads can carry user-controlled text; cap the length and blank
// out control characters before they reach the log stream.
fn clamp_for_log(value: &str, max_chars: usize) -> String {
    let mut cleaned = String::with_capacity(value.len().min(max_chars));
    for ch in value.chars().take(max_chars) {
        cleaned.push(if ch.is_control() { ' ' } else { ch });
    }
    if value.chars().count() > max_chars {
        cleaned.push_str("...");
    }
    cleaned
}
