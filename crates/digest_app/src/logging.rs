//! Process-wide logging setup for page_digest.
//!
//! [`initialize`] installs the global logger once; the returned guard flushes
//! every sink when dropped.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{LevelFilter, SetLoggerError};
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const DEFAULT_LOG_FILE: &str = "scraping.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogDestination {
    /// Append to the log file only.
    File,
    /// Write to terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both file and terminal.
    #[default]
    Both,
}

/// Keeps logging alive for the run; dropping it flushes the sinks.
#[must_use = "dropping the guard tears logging down immediately"]
pub struct LoggingGuard {
    log_file: Option<PathBuf>,
}

impl LoggingGuard {
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        digest_logging::flush();
    }
}

/// Initialize the logger with the specified destination.
///
/// Fails if a global logger is already installed. A log file that cannot be
/// opened is reported on stderr and skipped; the terminal sink still works.
pub fn initialize(
    destination: LogDestination,
    log_path: &Path,
) -> Result<LoggingGuard, SetLoggerError> {
    let level = LevelFilter::Info;
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    let mut log_file = None;
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(level, config, log_path) {
            loggers.push(file_logger);
            log_file = Some(log_path.to_path_buf());
        }
    }

    CombinedLogger::init(loggers)?;
    Ok(LoggingGuard { log_file })
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!(
                "Warning: Could not open log file at {:?}: {}",
                log_path, err
            );
            None
        }
    }
}
