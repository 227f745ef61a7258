// src/source/mod.rs
//! # Source readers
//!
//! Everything that turns an input file into a [`Sheet`]: a header row plus
//! data rows of plain strings. Readers know nothing about questions; column
//! meaning is decided later by a [`crate::columns::ColumnResolver`].
//!
//! - `csv`  – in-tree CSV/TSV reader (quotes + CRLF tolerant).
//! - `xlsx` – workbook reader over `calamine` (feature `xlsx`).
//!
//! Empty cells and the literal `nan` (what pandas-exported sheets leave behind)
//! read as absent.

pub mod csv;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use std::path::Path;

use crate::error::{Error, Result};
pub use self::csv::Delim;

/// A loaded table: first row is the header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Split raw rows into header + data. An empty input is an empty sheet.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows.remove(0).into_iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Iterate data rows with their 1-based sheet position (header is row 1,
    /// so the first data row is 2, matching what a spreadsheet UI shows).
    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, cells)| Row { line: i + 2, cells })
    }
}

/// Borrowed view of one data row.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    pub line: usize,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    pub fn new(line: usize, cells: &'a [String]) -> Self { Self { line, cells } }

    /// Cell at a resolved column, or `None` if unresolved, out of range or blank.
    pub fn get(&self, col: Option<usize>) -> Option<&'a str> {
        present(self.cells.get(col?)?)
    }

    pub fn width(&self) -> usize { self.cells.len() }
}

/// Treat blank and `nan` cells as missing.
pub fn present(cell: &str) -> Option<&str> {
    let t = cell.trim();
    if t.is_empty() || t.eq_ignore_ascii_case("nan") { None } else { Some(cell) }
}

/// Pick a reader by file extension and load the sheet.
/// `sheet_name` only matters for workbooks; `None` means the first sheet.
pub fn read_sheet(path: &Path, sheet_name: Option<&str>) -> Result<Sheet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => csv::read_path(path, Delim::Csv),
        "tsv" | "tab" => csv::read_path(path, Delim::Tsv),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path, sheet_name),
        other => Err(Error::UnsupportedInput {
            path: path.to_path_buf(),
            reason: format!("unknown extension {other:?}"),
        }),
    }
}

#[cfg(feature = "xlsx")]
fn read_workbook(path: &Path, sheet_name: Option<&str>) -> Result<Sheet> {
    xlsx::read_path(path, sheet_name)
}

#[cfg(not(feature = "xlsx"))]
fn read_workbook(path: &Path, _sheet_name: Option<&str>) -> Result<Sheet> {
    Err(Error::UnsupportedInput {
        path: path.to_path_buf(),
        reason: s!("built without the `xlsx` feature"),
    })
}
