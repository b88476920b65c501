use std::fs;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Create a directory and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|err| IngestError::DirCreate {
        path: path.to_path_buf(),
        source: err,
    })
}

/// Write a text file, creating the parent directory first.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|err| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: err,
    })
}

/// Write raw bytes, creating the parent directory first.
pub fn write_bytes(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|err| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: err,
    })
}

/// Read a whole text file.
pub fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|err| IngestError::FileRead {
        path: path.to_path_buf(),
        source: err,
    })
}
