//! Lag expansion of a period-aggregated series

use std::ops::Range;

use chrono::{Duration, NaiveDate};
use polars::prelude::*;

use super::table::{DatedSeries, DatedTable, DATE_COLUMN};
use crate::error::{MatrixError, Result};

/// Name of the column holding `base` at lag `lag`
pub fn lag_column_name(base: &str, lag: i64) -> String {
    format!("{}_{}", base, lag)
}

/// `index` moved by `-lag * t_unit` days
fn shifted_index(index: &[NaiveDate], lag: i64, t_unit: i64) -> Result<Vec<NaiveDate>> {
    let out_of_range = || {
        MatrixError::invalid_argument(
            "t_unit",
            t_unit,
            format!("lag {} moves dates outside the supported calendar", lag),
        )
    };

    let offset = lag
        .checked_mul(t_unit)
        .and_then(i64::checked_neg)
        .and_then(Duration::try_days)
        .ok_or_else(out_of_range)?;
    index
        .iter()
        .map(|d| d.checked_add_signed(offset).ok_or_else(out_of_range))
        .collect()
}

/// Expand one series into a column per lag in `lags`.
///
/// Column `{name}_{k}` is the series moved forward in time by `-k * t_unit`
/// days, so its value on date `d` is the source value on `d + k * t_unit`.
/// The result index is the union of every shifted index.
pub fn shift_series(series: &DatedSeries<'_>, lags: Range<i64>, t_unit: i64) -> Result<DatedTable> {
    if t_unit <= 0 {
        return Err(MatrixError::invalid_argument("t_unit", t_unit, "must be positive"));
    }
    if lags.is_empty() {
        return Err(MatrixError::invalid_argument(
            "lags",
            format!("{}..{}", lags.start, lags.end),
            "lag range is empty",
        ));
    }

    let shifted = lags
        .clone()
        .map(|k| -> Result<DatedTable> {
            let dates = shifted_index(series.index(), k, t_unit)?;
            let mut values = series.column().clone();
            values.rename(lag_column_name(series.name(), k).into());
            DatedTable::from_frame(DataFrame::new(vec![Column::new(DATE_COLUMN.into(), dates), values])?)
        })
        .collect::<Result<Vec<_>>>()?;

    let table = DatedTable::concat(&shifted)?;
    tracing::trace!(series = series.name(), lags = lags.end - lags.start, rows = table.height(), "expanded lags");
    Ok(table)
}
