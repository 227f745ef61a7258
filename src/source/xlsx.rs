// src/source/xlsx.rs
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::Sheet;
use crate::error::{Error, Result};

/// Render a cell the way a person reading the sheet would type it.
/// Whole floats lose their ".0" so numeric ids stay stable ("1234", not "1234.0").
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => s!(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) => s!(),
        other => other.to_string(),
    }
}

pub fn read_path(path: &Path, sheet_name: Option<&str>) -> Result<Sheet> {
    if !path.exists() {
        return Err(Error::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        ));
    }
    let mut workbook = open_workbook_auto(path)?;

    let range = match sheet_name {
        Some(name) => workbook.worksheet_range(name)?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::Sheet(format!("{} has no worksheets", path.display())))??,
    };

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();

    let sheet = Sheet::from_rows(rows);
    logd!(
        "read {} data rows x {} columns from {}",
        sheet.len(),
        sheet.headers.len(),
        path.display()
    );
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_render_as_integers() {
        assert_eq!(cell_to_string(&Data::Float(1234.0)), "1234");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
    }

    #[test]
    fn bools_and_blanks() {
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String(s!("Opção"))), "Opção");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_path(Path::new("definitely/not/here.xlsx"), None).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
