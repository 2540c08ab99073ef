//! CSV read/write primitives
//!
//! Typed wrappers over the `csv` crate. Writes always replace the target
//! file in full, via a temp file and rename, so readers never observe a
//! half-written store.

use crate::store::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Reads all rows of a CSV file
///
/// # Errors
///
/// [`StoreError::NotFound`] when the file does not exist;
/// [`StoreError::Csv`] on malformed content.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path).map_err(|source| StoreError::Csv {
        path: path.display().to_string(),
        source,
    })?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|source| StoreError::Csv {
            path: path.display().to_string(),
            source,
        })?);
    }

    Ok(rows)
}

/// Reads all rows, treating a missing file as an empty store
///
/// Used for the append-only databases, which do not exist before the
/// first run.
pub fn read_rows_or_empty<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    match read_rows(path) {
        Ok(rows) => Ok(rows),
        Err(StoreError::NotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Replaces the file at `path` with the given rows
///
/// Writes to a sibling temp file first and renames it into place, so a
/// crash never leaves a partially written store behind.
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> StoreResult<()> {
    let io_error = |source: std::io::Error| StoreError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
    }

    let tmp_path = path.with_extension("csv.tmp");

    {
        let mut writer =
            csv::Writer::from_path(&tmp_path).map_err(|source| StoreError::Csv {
                path: tmp_path.display().to_string(),
                source,
            })?;

        for row in rows {
            writer.serialize(row).map_err(|source| StoreError::Csv {
                path: tmp_path.display().to_string(),
                source,
            })?;
        }

        writer.flush().map_err(io_error)?;
    }

    std::fs::rename(&tmp_path, path).map_err(io_error)?;

    Ok(())
}
