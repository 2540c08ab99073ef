//! Roster job: daily athlete-database update
//!
//! Crawls the free-agent market listing, fetches each athlete's profile and
//! weekly-test pages, writes the dated roster snapshot, and merges the
//! flattened rows into the athlete database.

use crate::config::Config;
use crate::jobs::ROSTER_SEARCH;
use crate::merge::{flatten, merge_athlete_rows};
use crate::scrape::paginator::collect_listing;
use crate::scrape::profile::parse_profile;
use crate::scrape::weekly_tests::parse_test_results;
use crate::scrape::{profile_path, weekly_tests_path, AthleteRecord};
use crate::session::Session;
use crate::store::{read_rows_or_empty, write_rows, AthleteRow, DataPaths};
use crate::MarketError;
use chrono::NaiveDate;

/// Runs the roster job for today
pub async fn run(config: &Config) -> Result<(), MarketError> {
    run_for_date(config, chrono::Local::now().date_naive()).await
}

/// Runs the roster job for a given calendar date
pub async fn run_for_date(config: &Config, date: NaiveDate) -> Result<(), MarketError> {
    let paths = DataPaths::new(&config.data.data_dir);
    let snapshot_path = paths.roster_snapshot(date);

    if snapshot_path.exists() {
        tracing::info!(
            "Roster snapshot {} already exists, nothing to do",
            snapshot_path.display()
        );
        return Ok(());
    }

    tracing::info!("Start updating athlete database");

    let session = Session::new(config)?;
    session.login().await?;

    let result = async {
        let records = scrape_roster(&session).await?;

        let rows = flatten(&records);
        write_rows(&snapshot_path, &rows)?;
        tracing::info!(
            "{} athlete records saved to {}",
            records.len(),
            snapshot_path.display()
        );

        let database_path = paths.athlete_database();
        let existing: Vec<AthleteRow> = read_rows_or_empty(&database_path)?;
        tracing::info!("Athlete database rows before merge: {}", existing.len());

        let merged = merge_athlete_rows(existing, rows);
        write_rows(&database_path, &merged)?;
        tracing::info!("Athlete database rows after merge: {}", merged.len());

        Ok(())
    }
    .await;

    session.logout().await;

    result
}

/// Crawls the listing and the per-athlete detail pages
///
/// An athlete whose detail pages cannot be fetched is skipped with a
/// warning; the rest of the run continues.
async fn scrape_roster(session: &Session) -> Result<Vec<AthleteRecord>, MarketError> {
    let summaries = collect_listing(session, ROSTER_SEARCH).await?;
    tracing::info!("Found {} athletes on the market", summaries.len());

    let mut records = Vec::with_capacity(summaries.len());
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

        let tests_body = match session.get(&weekly_tests_path(athlete_id)).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    "Skipping athlete {}: weekly-test fetch failed: {}",
                    athlete_id,
                    e
                );
                continue;
            }
        };
        let results = parse_test_results(&tests_body);

        records.push(AthleteRecord {
            summary,
            profile,
            results,
        });
    }

    Ok(records)
}
