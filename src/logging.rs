//! Tracing setup: stderr plus a day-stamped log file

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::FmtSubscriber;

use crate::constants::logging::{FILE_PREFIX, LEVEL_ENV};

/// Log file in use, set once by [`init`]
static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

/// Parse log level from environment variable value
fn parse_level(value: Option<&str>) -> TraceLevel {
    match value.unwrap_or("info").to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

pub fn log_file_name(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}_{}.log", date.format("%Y-%m-%d"))
}

/// Directory containing the running executable
pub fn default_log_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to resolve executable path")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("Executable path has no parent directory")
}

/// Install the global subscriber. Later calls return the first log path.
pub fn init(log_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = LOG_FILE.get() {
        return Ok(path.clone());
    }

    let path = log_dir.join(log_file_name(Local::now().date_naive()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file at {}", path.display()))?;

    let level = parse_level(std::env::var(LEVEL_ENV).ok().as_deref());
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(std::io::stderr.and(Mutex::new(file)))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let path = LOG_FILE.get_or_init(|| path).clone();
    info!("==================================================");
    info!(log_file = %path.display(), "Starting launcher");
    Ok(path)
}
