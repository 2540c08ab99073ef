//! Athlete database merge
//!
//! Flattens crawl records into one row per discipline result and merges
//! them into the persisted database with key-based dedup. Previously
//! persisted rows always win over same-key new rows, which makes the merge
//! idempotent across repeated runs on the same day.

use crate::scrape::AthleteRecord;
use crate::store::AthleteRow;
use std::collections::HashSet;

/// Flattens crawl records into database rows, one per test result
pub fn flatten(records: &[AthleteRecord]) -> Vec<AthleteRow> {
    records
        .iter()
        .flat_map(|record| {
            record
                .results
                .iter()
                .map(|result| AthleteRow::from_parts(&record.summary, &record.profile, result))
        })
        .collect()
}

/// Merges new rows into the existing database rows
///
/// Concatenates existing rows before new ones and keeps the first
/// occurrence of each `(athlete_id, week, discipline)` key, so the
/// persisted store is never rewritten by a re-crawl of the same week.
/// The result is the full replacement content for the store.
pub fn merge_athlete_rows(existing: Vec<AthleteRow>, new: Vec<AthleteRow>) -> Vec<AthleteRow> {
    let mut seen: HashSet<(u32, u32, String)> = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len() + new.len());

    for row in existing.into_iter().chain(new) {
        let (athlete_id, week, discipline) = row.key();
        if seen.insert((athlete_id, week, discipline.to_string())) {
            merged.push(row);
        }
    }

    merged
}
