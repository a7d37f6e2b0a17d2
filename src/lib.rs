//! Hydro Matrix - supervised-learning matrices from daily hydrological series
//!
//! This crate turns a daily table of runoff and meteorological drivers into
//! the matrices consumed by a runoff forecasting model:
//!
//! - Training matrix: 30 day mean runoff target plus the lagged period
//!   history of every temperature, snow, precipitation and
//!   evapotranspiration column, restricted to rows with a complete history
//! - Inference matrix: the lagged period history of a driver table alone
//! - CSV loading and saving through polars
//! - Settings and logging setup
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hydro_matrix::{create_in_matrix, create_it_matrix, load_csv, GroupedColumns};
//!
//! fn main() -> hydro_matrix::Result<()> {
//!     // One year of monthly periods
//!     let training = create_it_matrix("data/daily_input.csv", 12, 30)?;
//!     println!("{} training rows", training.height());
//!
//!     let daily = load_csv("data/daily_input.csv")?;
//!     if let Some(drivers) = GroupedColumns::partition(&daily)?.driver_table()? {
//!         let inputs = create_in_matrix(&drivers, 12, 30)?;
//!         println!("{} inference rows", inputs.height());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod matrix;
pub mod platform;

// Re-export commonly used types
pub use error::{MatrixError, Result};
pub use matrix::{
    build_it_blocks, create_in_matrix, create_it_matrix, load_csv, save_csv, shift_series,
    Aggregation, ColumnBlock, DailyInput, DatedSeries, DatedTable, GroupedColumns, TableColumn,
    VariableGroup, WindowSpec,
};
pub use platform::{init_logger, Settings, SETTINGS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
