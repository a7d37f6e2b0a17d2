//! Input/target matrix construction from daily hydrological series.
//!
//! - **table**: Date-indexed polars frames and borrowed series views
//! - **group**: Variable groups keyed by column name prefix
//! - **aggregate**: Trailing-window period aggregation
//! - **lag**: Lag expansion of an aggregated series
//! - **builder**: Training and inference matrix builders
//! - **io**: CSV and polars DataFrame conversion

pub mod aggregate;
pub mod builder;
pub mod group;
pub mod io;
pub mod lag;
pub mod table;

pub use aggregate::{rolling_aggregate, Aggregation};
pub use builder::{
    build_it_blocks, create_in_matrix, create_it_matrix, ColumnBlock, DailyInput, WindowSpec,
    TARGET_WINDOW_DAYS,
};
pub use group::{GroupRole, GroupedColumns, VariableGroup};
pub use io::{from_dataframe, load_csv, save_csv, to_dataframe};
pub use lag::{lag_column_name, shift_series};
pub use table::{DatedSeries, DatedTable, TableColumn, DATE_COLUMN};
