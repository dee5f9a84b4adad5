use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Env var that switches on the debug log file
const DEBUG_LOG_ENV: &str = "CURSOR_EXPORT_DEBUG_LOG";

struct FileLogger {
    file: Mutex<Option<File>>,
    log_path: PathBuf,
}

impl FileLogger {
    fn new() -> Self {
        let log_path = get_log_path();
        FileLogger {
            file: Mutex::new(None),
            log_path,
        }
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let level = record.level();
            let target = record.target();
            let message = record.args();

            let log_line = format!("[{timestamp}] [{level:5}] [{target}] {message}\n");

            if let Ok(mut guard) = self.file.lock() {
                if let Some(ref mut file) = *guard {
                    let _ = file.write_all(log_line.as_bytes());
                }
            }

            // Warnings still reach the terminal
            if level <= Level::Warn {
                eprint!("{}", log_line);
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

fn get_log_path() -> PathBuf {
    get_log_dir().join("debug.log")
}

fn get_log_dir() -> PathBuf {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cursor-chat-export");
    let _ = std::fs::create_dir_all(&log_dir);
    log_dir
}

static LOGGER: std::sync::OnceLock<FileLogger> = std::sync::OnceLock::new();

/// Initialize logging.
///
/// With `CURSOR_EXPORT_DEBUG_LOG` set, every debug record goes to a log file in
/// the cache dir. Otherwise `env_logger` writes to stderr at `warn`, or `info`
/// when `verbose`; `RUST_LOG` overrides either default.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    if env_logging_enabled() {
        return init_file_logger();
    }

    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init()
}

fn init_file_logger() -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(FileLogger::new);

    // Truncate on startup, then append for the rest of the run
    if let Ok(file) = File::create(&logger.log_path) {
        drop(file);
    }
    if let Ok(mut guard) = logger.file.lock() {
        *guard = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&logger.log_path)
            .ok();
    }

    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Debug);

    log::info!("=== Cursor Chat Export Debug Log Started ===");
    log::info!("Log file: {:?}", logger.log_path);

    Ok(())
}

fn env_logging_enabled() -> bool {
    std::env::var(DEBUG_LOG_ENV)
        .map(|value| {
            let trimmed = value.trim();
            !trimmed.is_empty() && trimmed != "0"
        })
        .unwrap_or(false)
}

