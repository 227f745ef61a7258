// src/source/csv.rs
use std::mem::take;
use std::path::Path;

use super::Sheet;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delim {
    Csv,
    Tsv,
}

impl Delim {
    pub fn sep(self) -> char {
        match self { Delim::Csv => ',', Delim::Tsv => '\t' }
    }
}

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant).
/// Quoted fields may span lines; `""` inside quotes is a literal quote.
pub fn parse_rows(text: &str, delim: Delim) -> Vec<Vec<String>> {
    let sep = delim.sep();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

pub fn read_str(text: &str, delim: Delim) -> Sheet {
    Sheet::from_rows(parse_rows(text, delim))
}

pub fn read_path(path: &Path, delim: Delim) -> Result<Sheet> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let sheet = read_str(&text, delim);
    logd!("read {} data rows from {}", sheet.len(), path.display());
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fields_with_separators_and_newlines() {
        let text = "a,b\n\"x, y\",\"linha 1\nlinha 2\"\n";
        let rows = parse_rows(text, Delim::Csv);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["x, y", "linha 1\nlinha 2"]);
    }

    #[test]
    fn doubled_quotes_and_crlf() {
        let rows = parse_rows("\"diz \"\"sim\"\"\",2\r\n3,4", Delim::Csv);
        assert_eq!(rows, vec![vec!["diz \"sim\"", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let rows = parse_rows("a\n\n\nb\n", Delim::Csv);
        assert_eq!(rows, vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn tsv_and_bom() {
        let sheet = read_str("\u{feff}Id\tTexto\n1\tOlá, mundo\n", Delim::Tsv);
        assert_eq!(sheet.headers, vec!["Id", "Texto"]);
        assert_eq!(sheet.rows[0], vec!["1", "Olá, mundo"]);
    }

    #[test]
    fn trailing_empty_field_is_kept() {
        let rows = parse_rows("a,b,\n", Delim::Csv);
        assert_eq!(rows, vec![vec!["a", "b", ""]]);
    }
}
