//! Labeled rectangular result tables and the sinks that write them.

use crate::error::ReportError;
use log::warn;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One table cell. Numbers render with full precision; non-finite values
/// render as their textual form (`NaN`, `inf`, `-inf`).
#[derive(Clone, Debug, Serialize)]
pub enum Cell {
    Int(i64),
    Num(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Num(v) => write!(f, "{}", v),
            Cell::Text(v) => write!(f, "{}", v),
        }
    }
}

/// A named rectangular table with a stable column order.
#[derive(Clone, Debug, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len(), "ragged row in {}", self.name);
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Destination for result tables. Writing an empty table is a per-table
/// warning, never a failure of the whole report.
pub trait TableSink {
    fn write_table(&mut self, table: &Table) -> Result<(), ReportError>;

    fn write_all(&mut self, tables: &[Table]) -> Result<(), ReportError> {
        for table in tables {
            self.write_table(table)?;
        }
        Ok(())
    }
}

/// Writes each table as `<name>.csv` inside one output directory.
pub struct CsvDirSink {
    dir: PathBuf,
}

impl CsvDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| ReportError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }
}

impl TableSink for CsvDirSink {
    fn write_table(&mut self, table: &Table) -> Result<(), ReportError> {
        if table.is_empty() {
            warn!("table '{}' has no rows; skipping", table.name);
            return Ok(());
        }
        let path = self.dir.join(format!("{}.csv", table.name));
        let mut writer =
            csv::Writer::from_path(&path).map_err(|source| ReportError::Write {
                name: table.name.clone(),
                source,
            })?;
        let fail = |source| ReportError::Write {
            name: table.name.clone(),
            source,
        };
        writer.write_record(&table.columns).map_err(fail)?;
        for row in &table.rows {
            writer
                .write_record(row.iter().map(|c| c.to_string()))
                .map_err(fail)?;
        }
        writer.flush().map_err(|source| ReportError::Write {
            name: table.name.clone(),
            source: csv::Error::from(source),
        })?;
        Ok(())
    }
}
