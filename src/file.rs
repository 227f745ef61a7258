// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

/// Create/truncate `path` (parents included) and let `body` stream into it.
pub fn write_with<F>(path: &Path, body: F) -> Result<PathBuf>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);
    body(&mut out).map_err(|e| Error::io(path, e))?;
    out.flush().map_err(|e| Error::io(path, e))?;
    logf!("wrote {}", path.display());
    Ok(path.to_path_buf())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// `out/` or an existing directory → `out/<default_filename>`; anything else as given.
pub fn resolve_out_path(user: &Path, default_filename: &str) -> PathBuf {
    if user.as_os_str().is_empty() {
        return PathBuf::from(default_filename);
    }
    if looks_like_dir_hint(user) || user.is_dir() {
        user.join(default_filename)
    } else {
        user.to_path_buf()
    }
}
