//! Dataset path layout
//!
//! All durable artifacts live under one data directory:
//!
//! ```text
//! data/
//!   database.csv
//!   transfer_database.csv
//!   athlete_data_YYYYMMDD.csv
//!   YYYYMMDD_open_transfers.csv
//!   backup/
//!     backup_database_week_N.csv
//!     backup_transfer_database_week_N.csv
//! ```

use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

const SNAPSHOT_DATE_FORMAT: &str = "%Y%m%d";

/// Resolves dataset file locations under the configured data directory
#[derive(Debug, Clone)]
pub struct DataPaths {
    data_dir: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// The athlete database
    pub fn athlete_database(&self) -> PathBuf {
        self.data_dir.join("database.csv")
    }

    /// The transfer database
    pub fn transfer_database(&self) -> PathBuf {
        self.data_dir.join("transfer_database.csv")
    }

    /// Dated roster snapshot written by the roster job
    pub fn roster_snapshot(&self, date: NaiveDate) -> PathBuf {
        self.data_dir.join(format!(
            "athlete_data_{}.csv",
            date.format(SNAPSHOT_DATE_FORMAT)
        ))
    }

    /// Dated open-transfers snapshot, the day-over-day comparison baseline
    pub fn open_transfers(&self, date: NaiveDate) -> PathBuf {
        self.data_dir.join(format!(
            "{}_open_transfers.csv",
            date.format(SNAPSHOT_DATE_FORMAT)
        ))
    }

    /// Weekly backup copy of the athlete database
    pub fn backup_athlete_database(&self, date: NaiveDate) -> PathBuf {
        self.backup_dir()
            .join(format!("backup_database_week_{}.csv", date.iso_week().week()))
    }

    /// Weekly backup copy of the transfer database
    pub fn backup_transfer_database(&self, date: NaiveDate) -> PathBuf {
        self.backup_dir().join(format!(
            "backup_transfer_database_week_{}.csv",
            date.iso_week().week()
        ))
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.data_dir.join("backup")
    }
}
