//! File logger with size-based rotation.
//!
//! Lines go to `~/.config/winhelper/logs/winhelper.log` and carry the name
//! of the emitting thread, since hotkey presses are reported from the
//! hotkey thread rather than the caller's. Past the size limit the file is
//! moved to `winhelper.log.1` (one backup kept) and a fresh one is started.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "winhelper.log";

/// The `[log]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Off unless explicitly enabled.
    pub enabled: bool,
    /// "debug", "info", "warn" or "error".
    pub level: String,
    /// Size in megabytes at which the file is rotated.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Reads a configured level name, case-insensitively.
    ///
    /// Anything unrecognised means `Info`.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        [
            (Self::Debug, &["debug"][..]),
            (Self::Warn, &["warn", "warning"][..]),
            (Self::Error, &["error"][..]),
        ]
        .into_iter()
        .find(|(_, aliases)| aliases.iter().any(|a| a.eq_ignore_ascii_case(name)))
        .map_or(Self::Info, |(level, _)| level)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

/// An append-only file that rolls over to a single backup.
struct LogFile {
    path: PathBuf,
    file: File,
    size: u64,
    limit: u64,
}

impl LogFile {
    fn open(path: PathBuf, limit: u64) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path,
            file,
            size,
            limit,
        })
    }

    fn append(&mut self, line: &str) {
        if self.file.write_all(line.as_bytes()).is_ok() {
            self.size += line.len() as u64;
        }
        if self.limit > 0 && self.size >= self.limit {
            self.roll();
        }
    }

    fn roll(&mut self) {
        let _ = fs::rename(&self.path, backup_path(&self.path));
        if let Ok(reopened) = Self::open(self.path.clone(), self.limit) {
            *self = reopened;
        }
    }
}

struct Logger {
    threshold: Level,
    out: LogFile,
}

/// Starts file logging when `config.enabled` is set. Call once at startup.
///
/// Failing to create the log directory or file leaves logging off.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    if let Some(dir) = crate::config::config_dir() {
        init_at(&dir.join("logs"), config);
    }
}

fn init_at(log_dir: &Path, config: &LogConfig) {
    let _ = fs::create_dir_all(log_dir);
    let limit = config.max_file_mb.saturating_mul(1024 * 1024);
    let Ok(out) = LogFile::open(log_dir.join(LOG_FILE_NAME), limit) else {
        return;
    };

    let _ = LOGGER.set(Mutex::new(Logger {
        threshold: Level::parse(&config.level),
        out,
    }));
}

/// Records one line at `level`. A no-op until [`init`] has succeeded.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(logger) = LOGGER.get() else {
        return;
    };
    let mut logger = logger.lock().unwrap_or_else(PoisonError::into_inner);
    if level >= logger.threshold {
        logger.out.append(&format_line(level, args));
    }
}

fn format_line(level: Level, args: fmt::Arguments<'_>) -> String {
    let current = std::thread::current();
    let thread = current.name().unwrap_or("-");
    format!("{} {level:<5} [{thread}] {args}\n", timestamp())
}

/// `winhelper.log` -> `winhelper.log.1`
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}

/// UTC time of day with milliseconds.
fn timestamp() -> String {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs() % 86_400;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        since_epoch.subsec_millis()
    )
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}
