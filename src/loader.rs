use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use machine_learning::dataset::Dataset;
use serde::Serialize;

use crate::error::{AppErr, Result};

/// Accepted headers of the day column, the first match wins.
const DAY_COLUMNS: [&str; 2] = ["day", "dia"];
/// Accepted headers of the sales column, the first match wins.
const SALES_COLUMNS: [&str; 2] = ["sales", "ventas"];

/// One observation of the sales table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalesRow {
    pub day: f32,
    pub sales: f32,
}

/// The raw table as read from disk, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SalesTable {
    rows: Vec<SalesRow>,
}

impl SalesTable {
    /// Creates a new `SalesTable`, failing if there are no rows.
    pub fn new(rows: Vec<SalesRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(AppErr::EmptyTable);
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[SalesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn days(&self) -> Vec<f32> {
        self.rows.iter().map(|r| r.day).collect()
    }

    pub fn sales(&self) -> Vec<f32> {
        self.rows.iter().map(|r| r.sales).collect()
    }

    /// The table as a dataset of `day -> sales`.
    pub fn to_dataset(&self) -> Result<Dataset> {
        Ok(Dataset::new(self.days(), self.sales())?)
    }
}

/// Loads a sales table from a CSV file.
///
/// # Errors
/// Returns an error if the file can't be opened or its content is not a valid sales table.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<SalesTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AppErr::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = read_csv(file)?;
    info!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Reads a sales table from CSV content with a header row.
///
/// The day and sales columns are looked up by name, case insensitively, any other column is
/// ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<SalesTable> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let day_idx = find_column(&headers, &DAY_COLUMNS)?;
    let sales_idx = find_column(&headers, &SALES_COLUMNS)?;

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;

        rows.push(SalesRow {
            day: parse_cell(&record, day_idx, DAY_COLUMNS[0], row)?,
            sales: parse_cell(&record, sales_idx, SALES_COLUMNS[0], row)?,
        });
    }

    SalesTable::new(rows)
}

fn find_column(headers: &StringRecord, names: &[&'static str]) -> Result<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
        .ok_or_else(|| AppErr::MissingColumn {
            expected: names[0],
            found: headers.iter().map(str::to_string).collect(),
        })
}

fn parse_cell(record: &StringRecord, idx: usize, column: &'static str, row: usize) -> Result<f32> {
    let raw = record.get(idx).unwrap_or_default();

    match raw.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AppErr::InvalidValue {
            row,
            column,
            value: raw.to_string(),
        }),
    }
}
