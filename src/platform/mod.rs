//! Platform services shared by the matrix builders.
//!
//! - **setting**: Global settings management
//! - **logger**: Logging utilities
//! - **utility**: Working folder paths and date parsing

pub mod logger;
pub mod setting;
pub mod utility;

pub use logger::{init_logger, level_from_int, DEBUG, ERROR, INFO, WARNING};
pub use setting::{
    SettingValue, Settings, KEY_LOG_ACTIVE, KEY_LOG_CONSOLE, KEY_LOG_FILE, KEY_LOG_LEVEL,
    KEY_T_LENGTH, KEY_T_UNIT, SETTINGS,
};
pub use utility::{get_file_path, get_folder_path, parse_date, TEMP_DIR};
