//! Reading and writing dated tables through polars.
//!
//! Files are delimited text with one header row and the date in the first
//! column. Every other column is read as `f64`; empty cells and NaN become
//! missing values.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use super::table::{DatedTable, TableColumn};
use crate::error::{MatrixError, Result};
use crate::platform::utility::parse_date;

/// Load a daily table from a CSV file
pub fn load_csv(path: impl AsRef<Path>) -> Result<DatedTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| MatrixError::InvalidInput(format!("cannot open {}: {}", path.display(), e)))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| MatrixError::InvalidInput(format!("cannot parse {}: {}", path.display(), e)))?;

    let table = from_dataframe(&df)?;
    tracing::info!(path = %path.display(), rows = table.height(), columns = table.width(), "loaded daily table");
    Ok(table)
}

/// Convert a frame whose first column holds dates
pub fn from_dataframe(df: &DataFrame) -> Result<DatedTable> {
    let (date_column, value_columns) = df
        .get_columns()
        .split_first()
        .ok_or_else(|| MatrixError::InvalidInput("table has no date column".to_string()))?;

    let dates = date_column.as_materialized_series().cast(&DataType::String)?;
    let index = dates
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            Some(text) => parse_date(text),
            None => Err(MatrixError::InvalidInput(format!("missing date on row {}", row))),
        })
        .collect::<Result<Vec<_>>>()?;

    let columns = value_columns
        .iter()
        .map(|column| -> Result<TableColumn> {
            let values = column.strict_cast(&DataType::Float64).map_err(|e| {
                MatrixError::InvalidInput(format!("column {} is not numeric: {}", column.name(), e))
            })?;
            let values: Vec<Option<f64>> = values.f64()?.into_iter().collect();
            Ok(TableColumn::new(column.name().to_string(), values))
        })
        .collect::<Result<Vec<_>>>()?;

    DatedTable::new(index, columns)
}

/// Frame of a table, `date` column first
pub fn to_dataframe(table: &DatedTable) -> DataFrame {
    table.frame().clone()
}

/// Write a table as CSV with a header row
pub fn save_csv(table: &DatedTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut df = to_dataframe(table);
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| MatrixError::InvalidInput(format!("cannot write {}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), rows = table.height(), "saved matrix");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::table::DATE_COLUMN;
    use chrono::NaiveDate;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "daily.csv",
            "date,Q,T1,P1\n2001-01-01,1.5,-2,0\n2001-01-02,2.5,,3.25\n2001-01-03,3,1,NaN\n",
        );

        let table = load_csv(&path).unwrap();
        assert_eq!(table.column_names(), vec!["Q", "T1", "P1"]);
        assert_eq!(table.height(), 3);
        assert_eq!(table.index()[0], NaiveDate::from_ymd_opt(2001, 1, 1).unwrap());
        assert_eq!(table.values("Q").unwrap(), vec![Some(1.5), Some(2.5), Some(3.0)]);
        assert_eq!(table.values("T1").unwrap(), vec![Some(-2.0), None, Some(1.0)]);
        assert_eq!(table.values("P1").unwrap(), vec![Some(0.0), Some(3.25), None]);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = load_csv("/nonexistent/file.csv");
        assert!(matches!(result, Err(MatrixError::InvalidInput(_))));
    }

    #[test]
    fn test_load_csv_bad_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", "date,Q\nyesterday,1\ntoday,2\n");
        assert!(matches!(load_csv(&path), Err(MatrixError::InvalidInput(_))));
    }

    #[test]
    fn test_load_csv_unsorted_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "unsorted.csv", "date,Q\n2001-01-02,1\n2001-01-01,2\n");
        assert!(matches!(load_csv(&path), Err(MatrixError::InvalidInput(_))));
    }

    #[test]
    fn test_load_csv_rejects_text_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "text.csv", "date,Q,T1\n2001-01-01,1.0,abc\n2001-01-02,2.0,xyz\n");
        match load_csv(&path) {
            Err(MatrixError::InvalidInput(message)) => assert!(message.contains("T1")),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_reload() {
        let start = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
        let table = DatedTable::daily(
            start,
            vec![
                TableColumn::new("Q", vec![Some(1.0), Some(2.0), None]),
                TableColumn::new("T1_-1", vec![None, Some(0.5), Some(-4.0)]),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        save_csv(&table, &path).unwrap();

        assert_eq!(load_csv(&path).unwrap(), table);
    }

    #[test]
    fn test_to_dataframe_shape() {
        let start = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
        let table = DatedTable::daily(start, vec![TableColumn::from_values("Q", vec![1.0, 2.0])]).unwrap();
        let df = to_dataframe(&table);
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.get_columns()[0].name().as_str(), DATE_COLUMN);
    }
}
