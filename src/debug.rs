use parking_lot::Mutex;
/// File-backed `log` bridge for the native frontend
///
/// The native frontend owns the tty, so log output must never reach
/// stdout/stderr. Records go to /tmp/termfolio_debug.log on Unix/macOS,
/// or %TEMP%\termfolio_debug.log on Windows.
///
/// Level precedence: explicit level (CLI `--log-level`), then the
/// DEBUG_LEVEL environment variable, then the config's `log_level`:
/// - 0 or unset: No logging
/// - 1: Errors only
/// - 2: Info level (boot, commands)
/// - 3: Debug level (runs, cancellation)
/// - 4: Trace level (every typed line)
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        let mut file = self.file.lock();
        let _ = file.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let path = PathBuf::from("/tmp/termfolio_debug.log");
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join("termfolio_debug.log");
    path
}

/// Parse the DEBUG_LEVEL environment variable.
pub fn level_from_env() -> Option<LevelFilter> {
    let value = std::env::var("DEBUG_LEVEL").ok()?;
    level_from_number(value.trim())
}

fn level_from_number(value: &str) -> Option<LevelFilter> {
    match value.parse::<u8>().ok()? {
        0 => Some(LevelFilter::Off),
        1 => Some(LevelFilter::Error),
        2 => Some(LevelFilter::Info),
        3 => Some(LevelFilter::Debug),
        4 => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Pick the effective level from the three sources, highest precedence first.
pub fn resolve_level(
    cli: Option<LevelFilter>,
    env: Option<LevelFilter>,
    config: LevelFilter,
) -> LevelFilter {
    cli.or(env).unwrap_or(config)
}

/// Install the file logger. A level of `Off` installs nothing and creates
/// no file. Calling this more than once has no further effect.
pub fn init_log_bridge(level: LevelFilter) {
    if level == LevelFilter::Off || LOGGER.get().is_some() {
        return;
    }

    let path = log_path();
    let file = match OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(&path)
    {
        Ok(file) => file,
        // Silently fail if the log file can't be opened; the tty stays clean
        Err(_) => return,
    };

    let logger = LOGGER.get_or_init(|| FileLogger {
        level,
        file: Mutex::new(file),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
        log::info!(
            "termfolio {} debug session started (level={})",
            crate::VERSION,
            level
        );
    }
}
