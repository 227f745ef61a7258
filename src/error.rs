// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::columns::Role;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    #[error("Unsupported input {}: {reason}", .path.display())]
    UnsupportedInput { path: PathBuf, reason: String },

    #[error("Required column for {0} not found in header row")]
    MissingColumn(Role),

    #[error("Config error at line {line}: {msg}")]
    Config { line: usize, msg: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

#[cfg(feature = "xlsx")]
impl From<calamine::Error> for Error {
    fn from(e: calamine::Error) -> Self {
        Error::Sheet(e.to_string())
    }
}
