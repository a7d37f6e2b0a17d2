//! Date-indexed tables of daily observations
//!
//! A [`DatedTable`] is the common currency of the matrix builders: a polars
//! frame whose first column is a strictly ascending `date` column, followed by
//! any number of named `f64` columns. Missing observations are nulls; NaN never
//! appears inside a table.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::{MatrixError, Result};

/// Name of the date column leading every table frame
pub const DATE_COLUMN: &str = "date";

/// A named column of optional values, used to assemble a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl TableColumn {
    /// Create a column from optional values
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create a column from raw floats, NaN marking a missing observation
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, values.into_iter().map(Some).collect())
    }

    fn into_column(self) -> Column {
        Column::new(self.name.into(), self.values)
    }
}

/// Borrowed view of a single column together with the date index
#[derive(Debug, Clone, Copy)]
pub struct DatedSeries<'a> {
    name: &'a str,
    index: &'a [NaiveDate],
    column: &'a Column,
}

impl<'a> DatedSeries<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn index(&self) -> &'a [NaiveDate] {
        self.index
    }

    /// Underlying `f64` column
    pub fn column(&self) -> &'a Column {
        self.column
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.column
            .f64()
            .map(|ca| ca.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Value observed on `date`, `None` if the date is outside the index or missing
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        let row = self.index.binary_search(&date).ok()?;
        self.column.f64().ok()?.get(row)
    }
}

/// Date-indexed frame with one row per day
#[derive(Debug, Clone)]
pub struct DatedTable {
    frame: DataFrame,
    index: Vec<NaiveDate>,
}

fn check_ascending(index: &[NaiveDate]) -> Result<()> {
    match index.windows(2).find(|pair| pair[0] >= pair[1]) {
        Some(pair) => Err(MatrixError::InvalidInput(format!(
            "date index is not strictly ascending: {} followed by {}",
            pair[0], pair[1]
        ))),
        None => Ok(()),
    }
}

impl DatedTable {
    /// Create a table, checking the index is strictly ascending and every
    /// column matches its length
    pub fn new(index: Vec<NaiveDate>, columns: Vec<TableColumn>) -> Result<Self> {
        check_ascending(&index)?;
        if let Some(column) = columns.iter().find(|c| c.values.len() != index.len()) {
            return Err(MatrixError::InvalidInput(format!(
                "column {} has {} values for {} dates",
                column.name,
                column.values.len(),
                index.len()
            )));
        }

        let mut frame_columns = Vec::with_capacity(columns.len() + 1);
        frame_columns.push(Column::new(DATE_COLUMN.into(), index));
        frame_columns.extend(columns.into_iter().map(TableColumn::into_column));
        Self::from_frame(DataFrame::new(frame_columns)?)
    }

    /// Table over consecutive days starting at `start`
    pub fn daily(start: NaiveDate, columns: Vec<TableColumn>) -> Result<Self> {
        let height = columns.first().map(|c| c.values.len()).unwrap_or(0);
        let index = start.iter_days().take(height).collect();
        Self::new(index, columns)
    }

    /// Wrap a frame laid out as `date` (Date, no nulls, strictly ascending)
    /// followed by `f64` columns
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        let (dates, values) = frame
            .get_columns()
            .split_first()
            .ok_or_else(|| MatrixError::InvalidInput("table has no date column".to_string()))?;
        if dates.name().as_str() != DATE_COLUMN || dates.dtype() != &DataType::Date {
            return Err(MatrixError::InvalidInput(format!(
                "first column must be {} of type date, found {} of type {}",
                DATE_COLUMN,
                dates.name(),
                dates.dtype()
            )));
        }
        if let Some(column) = values.iter().find(|c| c.dtype() != &DataType::Float64) {
            return Err(MatrixError::InvalidInput(format!(
                "column {} has type {}, expected f64",
                column.name(),
                column.dtype()
            )));
        }

        let index = dates
            .date()?
            .as_date_iter()
            .enumerate()
            .map(|(row, date)| {
                date.ok_or_else(|| MatrixError::InvalidInput(format!("missing date on row {}", row)))
            })
            .collect::<Result<Vec<_>>>()?;
        check_ascending(&index)?;

        Ok(Self { frame, index })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    fn value_columns(&self) -> &[Column] {
        self.frame.get_columns().get(1..).unwrap_or_default()
    }

    fn value_column(&self, name: &str) -> Option<&Column> {
        self.value_columns().iter().find(|c| c.name().as_str() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.value_columns().iter().map(|c| c.name().as_str()).collect()
    }

    /// Values of column `name`, `None` if there is no such column
    pub fn values(&self, name: &str) -> Option<Vec<Option<f64>>> {
        self.series(name).map(|s| s.values())
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.index.len()
    }

    /// Number of value columns
    pub fn width(&self) -> usize {
        self.value_columns().len()
    }

    pub fn series(&self, name: &str) -> Option<DatedSeries<'_>> {
        self.value_column(name).map(|c| self.view(c))
    }

    pub fn iter_series(&self) -> impl Iterator<Item = DatedSeries<'_>> {
        self.value_columns().iter().map(move |c| self.view(c))
    }

    fn view<'a>(&'a self, column: &'a Column) -> DatedSeries<'a> {
        DatedSeries {
            name: column.name().as_str(),
            index: &self.index,
            column,
        }
    }

    /// Value of column `name` on `date`
    pub fn value_at(&self, name: &str, date: NaiveDate) -> Option<f64> {
        self.series(name).and_then(|s| s.get(date))
    }

    /// Total number of missing values across all columns
    pub fn missing_count(&self) -> usize {
        self.value_columns().iter().map(Column::null_count).sum()
    }

    /// Restrict the table to the named columns, in the given order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        if let Some(name) = names.iter().find(|n| self.value_column(n.as_ref()).is_none()) {
            return Err(MatrixError::InvalidInput(format!("no column named {}", name.as_ref())));
        }
        let selection = std::iter::once(DATE_COLUMN).chain(names.iter().map(|n| n.as_ref()));
        Ok(Self {
            frame: self.frame.select(selection)?,
            index: self.index.clone(),
        })
    }

    /// Horizontal concatenation aligned on the union of all indices.
    ///
    /// A full join on `date`; dates absent from a table become nulls in its
    /// columns.
    pub fn concat<'a, I>(tables: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a DatedTable>,
    {
        let mut tables = tables.into_iter();
        let first = tables
            .next()
            .ok_or_else(|| MatrixError::InvalidInput("no tables to concatenate".to_string()))?;

        let joined = tables.fold(first.frame.clone().lazy(), |acc, table| {
            acc.join_builder()
                .with(table.frame.clone().lazy())
                .how(JoinType::Full)
                .on([col(DATE_COLUMN)])
                .coalesce(JoinCoalesce::CoalesceColumns)
                .finish()
        });
        let frame = joined
            .sort([DATE_COLUMN], SortMultipleOptions::default())
            .collect()?;
        Self::from_frame(frame)
    }

    /// Remove every row holding a missing value in any column
    pub fn drop_incomplete(&self) -> Result<Self> {
        let frame = self.frame.clone().lazy().drop_nulls(None).collect()?;
        Self::from_frame(frame)
    }
}

impl PartialEq for DatedTable {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.frame.equals_missing(&other.frame)
    }
}
