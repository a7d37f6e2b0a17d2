//! Trailing-window period aggregation of daily columns

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::table::DatedTable;
use crate::error::{MatrixError, Result};

/// Statistic folding a window of daily values into one period value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
    Mean,
    Sum,
}

impl Aggregation {
    /// Trailing statistic over the last `window` rows of `column`.
    ///
    /// The value at row `i` folds rows `i + 1 - window ..= i`. It is null when
    /// fewer than `window` rows precede it or any value in the window is null.
    pub fn rolling(self, column: &str, window: usize) -> Expr {
        let options = RollingOptionsFixedWindow {
            window_size: window,
            min_periods: window,
            ..Default::default()
        };
        match self {
            Aggregation::Mean => col(column).rolling_mean(options),
            Aggregation::Sum => col(column).rolling_sum(options),
        }
    }
}

/// Apply [`Aggregation::rolling`] to every column of `table`, keeping names and index
pub fn rolling_aggregate(table: &DatedTable, window: usize, aggregation: Aggregation) -> Result<DatedTable> {
    if window == 0 {
        return Err(MatrixError::invalid_argument("window", window, "must be at least one day"));
    }
    if table.width() == 0 {
        return Ok(table.clone());
    }

    let exprs: Vec<Expr> = table
        .column_names()
        .into_iter()
        .map(|name| aggregation.rolling(name, window))
        .collect();
    let frame = table.frame().clone().lazy().with_columns(exprs).collect()?;
    DatedTable::from_frame(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::table::TableColumn;
    use chrono::NaiveDate;

    fn single(values: Vec<Option<f64>>) -> DatedTable {
        let start = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        DatedTable::daily(start, vec![TableColumn::new("X", values)]).unwrap()
    }

    fn ones(n: usize) -> Vec<Option<f64>> {
        vec![Some(1.0); n]
    }

    #[test]
    fn test_rolling_mean() {
        let table = single((1..=5).map(|v| Some(v as f64)).collect());
        let out = rolling_aggregate(&table, 3, Aggregation::Mean).unwrap();
        assert_eq!(out.values("X").unwrap(), vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_rolling_sum() {
        let table = single((1..=5).map(|v| Some(v as f64)).collect());
        let out = rolling_aggregate(&table, 2, Aggregation::Sum).unwrap();
        assert_eq!(out.values("X").unwrap(), vec![None, Some(3.0), Some(5.0), Some(7.0), Some(9.0)]);
    }

    #[test]
    fn test_rolling_requires_full_window() {
        let table = single(vec![Some(1.0), Some(1.0), None, Some(1.0), Some(1.0), Some(1.0)]);
        let out = rolling_aggregate(&table, 3, Aggregation::Sum).unwrap();
        assert_eq!(out.values("X").unwrap(), vec![None, None, None, None, None, Some(3.0)]);
    }

    #[test]
    fn test_rolling_shorter_than_window() {
        let table = single(ones(4));
        let out = rolling_aggregate(&table, 5, Aggregation::Mean).unwrap();
        assert_eq!(out.missing_count(), 4);
    }

    #[test]
    fn test_rolling_aggregate_rejects_zero_window() {
        let table = single(ones(3));
        assert!(matches!(
            rolling_aggregate(&table, 0, Aggregation::Mean),
            Err(MatrixError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rolling_aggregate_keeps_layout() {
        let start = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let table = DatedTable::daily(
            start,
            vec![
                TableColumn::from_values("P1", vec![1.0, 2.0, 3.0]),
                TableColumn::from_values("P2", vec![0.0, 0.0, 1.0]),
            ],
        )
        .unwrap();

        let agg = rolling_aggregate(&table, 2, Aggregation::Sum).unwrap();
        assert_eq!(agg.index(), table.index());
        assert_eq!(agg.column_names(), vec!["P1", "P2"]);
        assert_eq!(agg.values("P1").unwrap(), vec![None, Some(3.0), Some(5.0)]);
        assert_eq!(agg.values("P2").unwrap(), vec![None, Some(0.0), Some(1.0)]);
    }
}
