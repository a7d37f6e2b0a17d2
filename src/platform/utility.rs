//! General utility functions.

use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::error::{MatrixError, Result};

/// Name of the working folder holding settings and logs
pub const WORK_FOLDER_NAME: &str = ".hydromatrix";

/// Get the base and working directories
fn get_work_dir(temp_name: &str) -> (PathBuf, PathBuf) {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let temp_path = cwd.join(temp_name);

    // A working folder in the current directory takes precedence
    if temp_path.exists() {
        return (cwd, temp_path);
    }

    let home_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let temp_path = home_path.join(temp_name);
    (home_path, temp_path)
}

/// Working directory
pub static TEMP_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    let (_, temp_dir) = get_work_dir(WORK_FOLDER_NAME);
    temp_dir
});

/// Get path for a file in the working folder
pub fn get_file_path(filename: &str) -> PathBuf {
    TEMP_DIR.join(filename)
}

/// Get path for a sub folder of the working folder, creating it if needed
pub fn get_folder_path(folder_name: &str) -> PathBuf {
    let folder_path = TEMP_DIR.join(folder_name);
    if !folder_path.exists() {
        let _ = fs::create_dir_all(&folder_path);
    }
    folder_path
}

/// Parse a date in `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or `YYYYMMDD` form
pub fn parse_date(arg: &str) -> Result<NaiveDate> {
    let arg = arg.trim();
    let parsed = if arg.contains('-') {
        // Anything after the date part is a time of day
        arg.get(..10)
            .ok_or(())
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| ()))
    } else {
        NaiveDate::parse_from_str(arg, "%Y%m%d").map_err(|_| ())
    };
    parsed.map_err(|_| MatrixError::InvalidInput(format!("malformed date: {:?}", arg)))
}
