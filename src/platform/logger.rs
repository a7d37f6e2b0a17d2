//! Logging setup.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::setting::{Settings, KEY_LOG_ACTIVE, KEY_LOG_CONSOLE, KEY_LOG_FILE, KEY_LOG_LEVEL};
use super::utility::get_folder_path;

/// Log levels as stored under `log.level`, following Python's logging module
pub const DEBUG: i32 = 10;
pub const INFO: i32 = 20;
pub const WARNING: i32 = 30;
pub const ERROR: i32 = 40;

/// Most verbose tracing level enabled by an integer level
pub fn level_from_int(level: i32) -> Level {
    match level {
        l if l <= DEBUG => Level::DEBUG,
        l if l <= INFO => Level::INFO,
        l if l <= WARNING => Level::WARN,
        _ => Level::ERROR,
    }
}

/// Initialize the global subscriber from `log.*` settings.
///
/// Does nothing when `log.active` is false or a subscriber is already set.
pub fn init_logger(settings: &Settings) {
    if !settings.get_bool(KEY_LOG_ACTIVE).unwrap_or(true) {
        return;
    }

    let log_level = settings
        .get_int(KEY_LOG_LEVEL)
        .and_then(|level| i32::try_from(level).ok())
        .unwrap_or(INFO);
    let log_console = settings.get_bool(KEY_LOG_CONSOLE).unwrap_or(true);
    let log_file = settings.get_bool(KEY_LOG_FILE).unwrap_or(false);

    let filter = EnvFilter::from_default_env().add_directive(level_from_int(log_level).into());

    let console_layer = log_console.then(|| fmt::layer().with_target(true).with_ansi(true));
    let file_layer = log_file
        .then(open_log_file)
        .flatten()
        .map(|file| fmt::layer().with_writer(Mutex::new(file)).with_ansi(false));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn open_log_file() -> Option<File> {
    let log_path = get_log_file_path();
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("cannot open log file {}: {}", log_path.display(), e);
            None
        }
    }
}

/// Get the log file path for today
fn get_log_file_path() -> PathBuf {
    let log_folder = get_folder_path("log");
    let today = Local::now().format("%Y%m%d").to_string();
    log_folder.join(format!("hydro_{}.log", today))
}
