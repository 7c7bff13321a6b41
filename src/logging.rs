use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "teva";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {0}: {1}")]
    DirectoryError(String, String),
    #[error("Failed to start logger: {0}")]
    StartError(String),
    #[error("Logging already initialized at {0}")]
    AlreadyInitialized(String),
}

/// Default log level for the current build mode
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) { "debug" } else { "info" }
}

/// Initialize file-based logging once per process.
///
/// Logs go to rotating files rather than stdout because the TUI owns the
/// terminal. Calling again with the same directory is a no-op; a different
/// directory is rejected.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir == log_dir {
            return Ok(());
        }
        return Err(LoggingError::AlreadyInitialized(
            state.log_dir.display().to_string(),
        ));
    }

    let init_dir = log_dir.to_path_buf();
    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, LoggingError> {
        std::fs::create_dir_all(&init_dir).map_err(|e| {
            LoggingError::DirectoryError(init_dir.display().to_string(), e.to_string())
        })?;

        let logger = Logger::try_with_str(level)
            .map_err(|e| LoggingError::StartError(e.to_string()))?
            .log_to_file(
                FileSpec::default()
                    .directory(init_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|e| LoggingError::StartError(e.to_string()))?;

        info!(
            "started version={} level={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            level,
            init_dir.display()
        );

        Ok(LoggingState {
            log_dir: init_dir,
            _logger: logger,
        })
    })?;

    if state.log_dir != log_dir {
        return Err(LoggingError::AlreadyInitialized(
            state.log_dir.display().to_string(),
        ));
    }

    Ok(())
}
