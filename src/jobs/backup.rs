//! Weekly backup job
//!
//! Copies both databases into the backup directory, tagged with the ISO
//! week number. Runs only when the calendar weekday matches the configured
//! backup day; on any other day it logs and exits.

use crate::config::Config;
use crate::store::DataPaths;
use crate::{ConfigError, MarketError};
use chrono::{Datelike, NaiveDate, Weekday};
use std::path::Path;

/// Runs the backup job for today
pub fn run(config: &Config) -> Result<(), MarketError> {
    run_for_date(config, chrono::Local::now().date_naive())
}

/// Runs the backup job for a given calendar date
pub fn run_for_date(config: &Config, date: NaiveDate) -> Result<(), MarketError> {
    let backup_day: Weekday = config.data.backup_weekday.parse().map_err(|_| {
        ConfigError::Validation(format!(
            "backup_weekday must be a weekday name, got '{}'",
            config.data.backup_weekday
        ))
    })?;

    if date.weekday() != backup_day {
        tracing::info!(
            "No backup scheduled for {} (backup day is {})",
            date.weekday(),
            backup_day
        );
        return Ok(());
    }

    let paths = DataPaths::new(&config.data.data_dir);
    std::fs::create_dir_all(paths.backup_dir())?;

    copy_if_present(
        &paths.athlete_database(),
        &paths.backup_athlete_database(date),
    )?;
    copy_if_present(
        &paths.transfer_database(),
        &paths.backup_transfer_database(date),
    )?;

    tracing::info!("Database backup made on {}", date);

    Ok(())
}

/// Copies one database, tolerating its absence before the first run
fn copy_if_present(source: &Path, target: &Path) -> Result<(), MarketError> {
    if !source.exists() {
        tracing::warn!("Skipping backup of {}: file not found", source.display());
        return Ok(());
    }

    std::fs::copy(source, target)?;
    tracing::info!("Copied {} to {}", source.display(), target.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CredentialsConfig, DataConfig, HttpConfig, SiteConfig, TransfersConfig,
    };
    use tempfile::TempDir;

    fn config_for(data_dir: &Path) -> Config {
        Config {
            site: SiteConfig {
                base_url: "https://www.maxithlon.com".to_string(),
                game_id: "1".to_string(),
            },
            credentials: CredentialsConfig {
                user: "coach".to_string(),
                password: "hunter2".to_string(),
            },
            http: HttpConfig::default(),
            data: DataConfig {
                data_dir: data_dir.display().to_string(),
                backup_weekday: "thursday".to_string(),
            },
            transfers: TransfersConfig::default(),
        }
    }

    // 2026-03-05 is a Thursday in ISO week 10
    fn backup_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    #[test]
    fn test_backup_copies_both_databases_on_backup_day() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());
        let paths = DataPaths::new(dir.path());

        std::fs::write(paths.athlete_database(), "a,b\n1,2\n").unwrap();
        std::fs::write(paths.transfer_database(), "c,d\n3,4\n").unwrap();

        run_for_date(&config, backup_day()).unwrap();

        assert_eq!(
            std::fs::read_to_string(paths.backup_athlete_database(backup_day())).unwrap(),
            "a,b\n1,2\n"
        );
        assert_eq!(
            std::fs::read_to_string(paths.backup_transfer_database(backup_day())).unwrap(),
            "c,d\n3,4\n"
        );
    }

    #[test]
    fn test_no_backup_on_other_days() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());
        let paths = DataPaths::new(dir.path());

        std::fs::write(paths.athlete_database(), "a,b\n1,2\n").unwrap();

        // 2026-03-06 is a Friday
        let friday = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        run_for_date(&config, friday).unwrap();

        assert!(!paths.backup_athlete_database(friday).exists());
    }

    #[test]
    fn test_missing_databases_are_tolerated() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());

        run_for_date(&config, backup_day()).unwrap();

        let paths = DataPaths::new(dir.path());
        assert!(!paths.backup_athlete_database(backup_day()).exists());
    }
}
