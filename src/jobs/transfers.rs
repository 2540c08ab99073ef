//! Transfer job: daily transfer-database update
//!
//! Snapshots the open transfer market, compares it against yesterday's
//! snapshot to find athletes that left the market overnight, annotates each
//! completion with its negotiation outcome, and appends the result to the
//! transfer database.

use crate::config::Config;
use crate::jobs::TRANSFER_SEARCH;
use crate::merge::{assess_value, completed_ids, dedup_rows, DuplicatePolicy};
use crate::scrape::negotiation::{parse_negotiation, sentinel};
use crate::scrape::paginator::collect_listing;
use crate::scrape::profile::parse_profile;
use crate::scrape::{negotiation_path, profile_path};
use crate::session::Session;
use crate::store::{read_rows, read_rows_or_empty, write_rows, DataPaths, SnapshotRow, TransferRow};
use crate::{MarketError, store::StoreError};
use chrono::{Days, NaiveDate};

/// Runs the transfer job for today
pub async fn run(config: &Config) -> Result<(), MarketError> {
    run_for_date(config, chrono::Local::now().date_naive()).await
}

/// Runs the transfer job for a given calendar date
///
/// Requires yesterday's open-transfers snapshot as the comparison baseline;
/// without it no completion can be detected and the run aborts with
/// [`MarketError::MissingBaseline`].
pub async fn run_for_date(config: &Config, date: NaiveDate) -> Result<(), MarketError> {
    let paths = DataPaths::new(&config.data.data_dir);
    let today_path = paths.open_transfers(date);

    if today_path.exists() {
        tracing::info!(
            "Open-transfers snapshot {} already exists, nothing to do",
            today_path.display()
        );
        return Ok(());
    }

    let yesterday = date
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| MarketError::MissingBaseline("date underflow".to_string()))?;
    let baseline_path = paths.open_transfers(yesterday);
    let baseline: Vec<SnapshotRow> = match read_rows(&baseline_path) {
        Ok(rows) => rows,
        Err(StoreError::NotFound(path)) => return Err(MarketError::MissingBaseline(path)),
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Start updating transfer database");

    let session = Session::new(config)?;
    session.login().await?;

    let result = async {
        let today_rows = scrape_open_transfers(&session).await?;
        tracing::info!("{} athletes currently listed for transfer", today_rows.len());

        let completed = completed_ids(&baseline, &today_rows);
        tracing::info!("{} transfers completed since yesterday", completed.len());

        let database_path = paths.transfer_database();
        let mut database: Vec<TransferRow> = read_rows_or_empty(&database_path)?;
        tracing::info!("Transfer database rows before merge: {}", database.len());

        for athlete_id in completed {
            let (negotiation_date, value) = match session.get(&negotiation_path(athlete_id)).await
            {
                Ok(body) => parse_negotiation(&body),
                Err(e) => {
                    tracing::warn!(
                        "Negotiation history fetch failed for athlete {}: {}",
                        athlete_id,
                        e
                    );
                    sentinel()
                }
            };

            for row in baseline.iter().filter(|row| row.athlete_id == athlete_id) {
                let assessed = assess_value(
                    negotiation_date,
                    row.deadline_datetime(),
                    value,
                    config.transfers.deadline_window_days,
                );
                database.push(row.clone().into_completion(assessed));
            }
        }

        let policy = DuplicatePolicy::from_flag(config.transfers.drop_all_duplicate_rows);
        let database = dedup_rows(database, policy);
        write_rows(&database_path, &database)?;
        tracing::info!("Transfer database rows after merge: {}", database.len());

        // Today's listing becomes tomorrow's baseline
        write_rows(&today_path, &today_rows)?;
        tracing::info!(
            "{} records saved to {}",
            today_rows.len(),
            today_path.display()
        );

        Ok(())
    }
    .await;

    session.logout().await;

    result
}

/// Crawls the open-transfer listing with per-athlete profiles
///
/// The profile fetch supplies the deadline; an athlete whose profile cannot
/// be fetched is skipped with a warning.
async fn scrape_open_transfers(session: &Session) -> Result<Vec<SnapshotRow>, MarketError> {
    let summaries = collect_listing(session, TRANSFER_SEARCH).await?;

    let mut rows = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let athlete_id = summary.athlete_id;

        let profile_body = match session.get(&profile_path(athlete_id)).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Skipping athlete {}: profile fetch failed: {}", athlete_id, e);
                continue;
            }
        };
        let profile = parse_profile(&profile_body);

        rows.push(SnapshotRow::from_parts(&summary, &profile));
    }

    Ok(rows)
}
