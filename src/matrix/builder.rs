//! Training and inference matrix builders.
//!
//! The training builder pairs a 30 day trailing runoff mean with the lagged
//! period history of every driver group and keeps only rows with a complete
//! history. The inference builder lags an already selected driver table with
//! a plain mean and leaves missing rows to the caller.

use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::aggregate::{rolling_aggregate, Aggregation};
use super::group::{GroupedColumns, VariableGroup};
use super::io::load_csv;
use super::lag::shift_series;
use super::table::DatedTable;
use crate::error::{MatrixError, Result};
use crate::platform::setting::{Settings, KEY_T_LENGTH, KEY_T_UNIT};

/// Days averaged into the runoff target, independent of the driver period
pub const TARGET_WINDOW_DAYS: usize = 30;

/// Validated lookback parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    t_length: i64,
    t_unit: i64,
}

impl WindowSpec {
    /// `t_length` periods of `t_unit` days each, both positive
    pub fn new(t_length: i64, t_unit: i64) -> Result<Self> {
        if t_length <= 0 {
            return Err(MatrixError::invalid_argument("t_length", t_length, "must be positive"));
        }
        if t_unit <= 0 {
            return Err(MatrixError::invalid_argument("t_unit", t_unit, "must be positive"));
        }
        Ok(Self { t_length, t_unit })
    }

    /// Read `matrix.t_length` and `matrix.t_unit` from settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let t_length = settings
            .get_int(KEY_T_LENGTH)
            .ok_or_else(|| MatrixError::Config(format!("{} is not an integer", KEY_T_LENGTH)))?;
        let t_unit = settings
            .get_int(KEY_T_UNIT)
            .ok_or_else(|| MatrixError::Config(format!("{} is not an integer", KEY_T_UNIT)))?;
        Self::new(t_length, t_unit)
    }

    pub fn t_length(&self) -> i64 {
        self.t_length
    }

    pub fn t_unit(&self) -> i64 {
        self.t_unit
    }

    /// Rolling window of a driver period, in rows
    pub fn period_days(&self) -> usize {
        self.t_unit as usize
    }

    /// `t_length` lags, from the earliest period up to the current one
    pub fn lag_range(&self) -> Range<i64> {
        -(self.t_length - 1)..1
    }
}

/// Source of the daily table handed to the training builder
#[derive(Debug, Clone, Copy)]
pub enum DailyInput<'a> {
    Table(&'a DatedTable),
    Path(&'a Path),
}

impl<'a> DailyInput<'a> {
    fn resolve(self) -> Result<Cow<'a, DatedTable>> {
        match self {
            DailyInput::Table(table) => Ok(Cow::Borrowed(table)),
            DailyInput::Path(path) => load_csv(path).map(Cow::Owned),
        }
    }
}

impl<'a> From<&'a DatedTable> for DailyInput<'a> {
    fn from(table: &'a DatedTable) -> Self {
        DailyInput::Table(table)
    }
}

impl<'a> From<&'a Path> for DailyInput<'a> {
    fn from(path: &'a Path) -> Self {
        DailyInput::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for DailyInput<'a> {
    fn from(path: &'a PathBuf) -> Self {
        DailyInput::Path(path.as_path())
    }
}

impl<'a> From<&'a str> for DailyInput<'a> {
    fn from(path: &'a str) -> Self {
        DailyInput::Path(Path::new(path))
    }
}

/// Columns contributed by one variable group
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBlock {
    pub group: VariableGroup,
    pub table: DatedTable,
}

/// Aggregate a table and lag-expand each of its columns into one table
fn lag_block(table: &DatedTable, aggregation: Aggregation, spec: WindowSpec) -> Result<DatedTable> {
    let aggregated = rolling_aggregate(table, spec.period_days(), aggregation)?;
    let lagged = aggregated
        .iter_series()
        .map(|series| shift_series(&series, spec.lag_range(), spec.t_unit()))
        .collect::<Result<Vec<_>>>()?;
    DatedTable::concat(&lagged)
}

/// Target block followed by one block per driver group present, in the
/// order they are concatenated into the training matrix.
pub fn build_it_blocks(daily: &DatedTable, spec: WindowSpec) -> Result<Vec<ColumnBlock>> {
    let grouped = GroupedColumns::partition(daily)?;

    let runoff = grouped
        .get(VariableGroup::Runoff)
        .ok_or_else(|| MatrixError::InvalidInput("no runoff (Q) column in daily input".to_string()))?;
    if runoff.width() != 1 {
        return Err(MatrixError::InvalidInput(format!(
            "expected exactly one runoff column, found {}: {}",
            runoff.width(),
            runoff.column_names().join(", ")
        )));
    }

    let mut blocks = Vec::with_capacity(1 + VariableGroup::DRIVERS.len());
    blocks.push(ColumnBlock {
        group: VariableGroup::Runoff,
        table: rolling_aggregate(runoff, TARGET_WINDOW_DAYS, VariableGroup::Runoff.aggregation())?,
    });

    for group in VariableGroup::DRIVERS {
        match grouped.get(group) {
            Some(members) => {
                let table = lag_block(members, group.aggregation(), spec)?;
                debug!(group = %group, columns = table.width(), "lagged driver group");
                blocks.push(ColumnBlock { group, table });
            }
            None => debug!(group = %group, "no columns, group skipped"),
        }
    }

    if let Some(run) = grouped.get(VariableGroup::Run) {
        debug!(columns = run.width(), "run columns are not part of the matrix");
    }

    Ok(blocks)
}

/// Build the input-target matrix from a daily table or a CSV path.
///
/// Every returned row has a defined target and a full `t_length` period
/// history for every driver column.
pub fn create_it_matrix<'a>(
    daily_input: impl Into<DailyInput<'a>>,
    t_length: i64,
    t_unit: i64,
) -> Result<DatedTable> {
    let spec = WindowSpec::new(t_length, t_unit)?;
    let daily = daily_input.into().resolve()?;

    let blocks = build_it_blocks(&daily, spec)?;
    let matrix = DatedTable::concat(blocks.iter().map(|b| &b.table))?;
    let complete = matrix.drop_incomplete()?;

    info!(
        rows = complete.height(),
        dropped = matrix.height() - complete.height(),
        columns = complete.width(),
        t_length,
        t_unit,
        "built input-target matrix"
    );
    Ok(complete)
}

/// Build the input-only matrix for prediction.
///
/// Every column is averaged over `t_unit` days regardless of its variable
/// group. Rows with an incomplete history are kept.
pub fn create_in_matrix(daily_input: &DatedTable, t_length: i64, t_unit: i64) -> Result<DatedTable> {
    let spec = WindowSpec::new(t_length, t_unit)?;
    if daily_input.width() == 0 {
        return Err(MatrixError::InvalidInput("inference input has no columns".to_string()));
    }

    let matrix = lag_block(daily_input, Aggregation::Mean, spec)?;
    info!(
        rows = matrix.height(),
        columns = matrix.width(),
        t_length,
        t_unit,
        "built input matrix"
    );
    Ok(matrix)
}
