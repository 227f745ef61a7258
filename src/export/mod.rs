// src/export/mod.rs
//! The two sinks: a JSON array and a TypeScript literal. Both are pure
//! functions of the accepted record sequence, so the same input always
//! produces byte-identical files.

pub mod json;
pub mod literal;

use std::io::Write;
use std::path::PathBuf;

use crate::config::options::ExportOptions;
use crate::error::Result;
use crate::file::write_with;
use crate::question::QuestionRecord;

/// Write whichever outputs are configured; returns the paths written.
pub fn write_outputs(records: &[QuestionRecord], export: &ExportOptions) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if let Some(path) = &export.json_path {
        let body = json::to_json_string(records)?;
        written.push(write_with(path, |w| w.write_all(body.as_bytes()))?);
    }
    if let Some(path) = &export.ts_path {
        written.push(write_with(path, |w| literal::write_literal(w, records, &export.literal))?);
    }
    if written.is_empty() {
        logw!("no outputs configured, nothing written");
    }
    Ok(written)
}
