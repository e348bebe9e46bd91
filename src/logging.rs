//! Tracing setup for the engine's binaries and host applications.
//!
//! Installs one global subscriber that writes to a timestamped per-launch
//! file, optionally mirrored to stdout. Only the newest engine log files are
//! kept; other files sharing the directory are left alone.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Maximum number of log files retained by default.
pub const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "formscope";
const LOG_FILE_EXTENSION: &str = "log";
/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

static LOG_STATE: OnceLock<(PathBuf, WorkerGuard)> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The app logs directory could not be resolved or created.
    #[error("No usable log directory: {0}")]
    LogDir(#[from] app_dirs::AppDirError),
    /// Failed to enumerate existing log files for pruning.
    #[error("Failed to read log directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to remove an obsolete log file.
    #[error("Failed to remove old log file {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to format a timestamp for the log filename.
    #[error("Failed to format log filename time: {0}")]
    FormatTime(time::error::Format),
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
    /// Failed to create the log file for this launch.
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where and how logs are written.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Directory for log files; `None` uses the app logs directory.
    pub log_dir: Option<PathBuf>,
    /// Mirror log lines to stdout.
    pub stdout: bool,
    pub max_files: usize,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            log_dir: None,
            stdout: true,
            max_files: MAX_LOG_FILES,
        }
    }
}

/// Initialize logging with default options.
pub fn init() -> Result<PathBuf, LoggingError> {
    init_with(&LogOptions::default())
}

/// Initialize logging and return the path of this launch's log file.
///
/// Later calls return the first launch's path without reconfiguring. Errors
/// are returned so callers can keep analysing frames without logging.
pub fn init_with(options: &LogOptions) -> Result<PathBuf, LoggingError> {
    if let Some((path, _)) = LOG_STATE.get() {
        return Ok(path.clone());
    }

    let log_dir = match &options.log_dir {
        Some(dir) => dir.clone(),
        None => app_dirs::logs_dir()?,
    };
    let log_file_name = format_log_file_name(now_local_or_utc())?;
    let log_path = log_dir.join(&log_file_name);
    create_log_file(&log_path)?;
    prune_old_logs(&log_dir, options.max_files.max(1))?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, log_file_name));
    let timer = build_timer();
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_timer(timer.clone())
        .with_writer(file_writer);
    let stdout_layer = options.stdout.then(|| {
        fmt::layer()
            .with_timer(timer)
            .with_writer(std::io::stdout)
    });

    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(file_layer)
        .with(stdout_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_STATE.set((log_path.clone(), guard));

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(log_path)
}

fn create_log_file(path: &Path) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn is_engine_log(path: &Path) -> bool {
    let has_prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX));
    let has_extension = path.extension().and_then(|ext| ext.to_str()) == Some(LOG_FILE_EXTENSION);
    has_prefix && has_extension
}

fn prune_old_logs(dir: &Path, max_files: usize) -> Result<(), LoggingError> {
    let mut logs: Vec<(SystemTime, PathBuf)> = fs::read_dir(dir)
        .map_err(|source| LoggingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
        .filter(|entry| is_engine_log(&entry.path()))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect();

    if logs.len() <= max_files {
        return Ok(());
    }
    logs.sort_by_key(|(modified, _)| *modified);
    let excess = logs.len() - max_files;
    for (_, path) in logs.into_iter().take(excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::RemoveFile { path, source })?;
    }
    Ok(())
}

fn format_log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    let name = now.format(NAME_FORMAT).map_err(LoggingError::FormatTime)?;
    Ok(format!("{LOG_FILE_PREFIX}_{name}.{LOG_FILE_EXTENSION}"))
}

fn build_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    #[test]
    fn log_filename_has_timestamp_and_prefix() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let name = format_log_file_name(fixed).unwrap();
        assert_eq!(name, "formscope_2023-11-14_22-13-20.log");
    }

    #[test]
    fn prune_keeps_newest_engine_logs_only() {
        let dir = tempdir().unwrap();
        create_log_file(&dir.path().join("host_app.log")).unwrap();
        create_log_file(&dir.path().join("notes.txt")).unwrap();
        for idx in 0..12 {
            create_log_file(&dir.path().join(format!("formscope_{idx:02}.log"))).unwrap();
            thread::sleep(Duration::from_millis(10));
        }

        prune_old_logs(dir.path(), 10).unwrap();

        let engine_logs = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| is_engine_log(&entry.path()))
            .count();
        assert_eq!(engine_logs, 10);
        assert!(!dir.path().join("formscope_00.log").exists());
        assert!(!dir.path().join("formscope_01.log").exists());
        assert!(dir.path().join("formscope_11.log").exists());
        assert!(dir.path().join("host_app.log").exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn engine_log_detection_requires_prefix_and_extension() {
        assert!(is_engine_log(Path::new("/tmp/formscope_2024.log")));
        assert!(!is_engine_log(Path::new("/tmp/formscope_2024.txt")));
        assert!(!is_engine_log(Path::new("/tmp/other.log")));
    }
}
