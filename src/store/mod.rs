//! Durable CSV stores
//!
//! The pipeline persists three kinds of artifacts, all rectangular CSV
//! files with a stable column order:
//! - the athlete database (`database.csv`)
//! - the transfer database (`transfer_database.csv`)
//! - dated per-run snapshots (roster and open-transfers)
//!
//! Full rewrites go through a temp file and an atomic rename, so a crash
//! mid-run never publishes partial state.

mod csv_io;
mod paths;
mod rows;

pub use csv_io::{read_rows, read_rows_or_empty, write_rows};
pub use paths::DataPaths;
pub use rows::{AthleteRow, SnapshotRow, TransferRow};

use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("IO error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
