// src/util/log.rs

//! File-based logging. The terminal belongs to the panel, so nothing is
//! ever written to stdout or stderr while it runs.
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::{LazyLock, OnceLock};
use chrono::Local;

pub const LOG_DIR_ENV: &str = "SYSLOG_PANEL_LOG_DIR";
pub const DEFAULT_LOG_DIR: &str = "./logs";

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Global logger instance
pub static LOGGER: LazyLock<Logger> = LazyLock::new(|| {
    Logger::new(&log_dir()).unwrap_or_else(|_| Logger::disabled())
});

/// `DEBUG=true` turns on debug.log.
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("DEBUG").unwrap_or_default() == "true")
}

/// Sends `tracing` output from the transport to `trace.log` next to the
/// other log files. Safe to call more than once.
pub fn init_tracing() {
    let dir = log_dir();
    if create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("trace.log")) else { return };

    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .try_init();
}

/// Directory the log files live in.
pub fn log_dir() -> PathBuf {
    std::env::var(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR))
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            LogLevel::Error => "error.log",
            LogLevel::Warn => "warn.log",
            LogLevel::Info => "info.log",
            LogLevel::Debug => "debug.log",
        }
    }
}

/// Logger that writes to separate files by severity
pub struct Logger {
    error_file: Option<Mutex<File>>,
    warn_file: Option<Mutex<File>>,
    info_file: Option<Mutex<File>>,
    debug_file: Option<Mutex<File>>,
}

impl Logger {
    /// Create a new logger with the specified directory
    pub fn new(log_dir: &Path) -> std::io::Result<Self> {
        create_dir_all(log_dir)?;

        // Start fresh each run
        let open = |level: LogLevel| -> std::io::Result<Option<Mutex<File>>> {
            Ok(Some(Mutex::new(File::create(log_dir.join(level.filename()))?)))
        };

        Ok(Self {
            error_file: open(LogLevel::Error)?,
            warn_file: open(LogLevel::Warn)?,
            info_file: open(LogLevel::Info)?,
            debug_file: open(LogLevel::Debug)?,
        })
    }

    /// A logger that drops everything, used when the log directory is unusable.
    pub fn disabled() -> Self {
        Self {
            error_file: None,
            warn_file: None,
            info_file: None,
            debug_file: None,
        }
    }

    /// Write a log entry to the appropriate file
    fn write_log(&self, level: LogLevel, message: &str) {
        let file = match level {
            LogLevel::Error => &self.error_file,
            LogLevel::Warn => &self.warn_file,
            LogLevel::Info => &self.info_file,
            LogLevel::Debug => &self.debug_file,
        };

        let Some(file) = file else { return };

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let formatted = format!("[{}] [{}] {}\n", timestamp, level.as_str(), message);

        if let Ok(mut file) = file.lock() {
            let _ = file.write_all(formatted.as_bytes());
            let _ = file.flush();
        }
    }

    pub fn error(&self, message: &str) {
        self.write_log(LogLevel::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.write_log(LogLevel::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.write_log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.write_log(LogLevel::Debug, message);
    }
}

/// Convenience macro for error logging with formatting
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.error(&message);
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.warn(&message);
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.info(&message);
    }};
}

/// Convenience macro for debug logging with formatting
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if $crate::util::log::debug_enabled() {
            let message = format!($($arg)*);
            $crate::util::log::LOGGER.debug(&message);
        }
    }};
}
