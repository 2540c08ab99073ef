//! Transfer database merge
//!
//! Detects transfers completed overnight by set difference on athlete ids,
//! assigns each completion an assessed value from its negotiation history,
//! and deduplicates the append-only transfer store.

use crate::store::{SnapshotRow, TransferRow};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};

/// How full-row duplicates in the transfer store are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep one copy of each duplicated row (default)
    CollapseToOne,

    /// Remove every copy of any duplicated row
    ///
    /// Reproduces the historical behavior; duplicated rows disappear
    /// entirely, including rows that were legitimately identical.
    DropAllCopies,
}

impl DuplicatePolicy {
    pub fn from_flag(drop_all_duplicate_rows: bool) -> Self {
        if drop_all_duplicate_rows {
            Self::DropAllCopies
        } else {
            Self::CollapseToOne
        }
    }
}

/// Ids present in yesterday's open-transfer listing but absent today
///
/// These athletes left the transfer market overnight: sold, withdrawn, or
/// expired. Order follows yesterday's listing; each id appears once.
pub fn completed_ids(yesterday: &[SnapshotRow], today: &[SnapshotRow]) -> Vec<u32> {
    let today_ids: HashSet<u32> = today.iter().map(|row| row.athlete_id).collect();

    let mut seen = HashSet::new();
    yesterday
        .iter()
        .map(|row| row.athlete_id)
        .filter(|id| !today_ids.contains(id) && seen.insert(*id))
        .collect()
}

/// Assigns the observed negotiation value only when the negotiation is
/// close enough to the deadline to plausibly be the causing sale
///
/// A negotiation dated within `window_days` of the deadline (inclusive,
/// either side) yields the observed value; anything else, including an
/// unknown deadline, yields 0.
pub fn assess_value(
    negotiation_date: NaiveDate,
    deadline: Option<NaiveDateTime>,
    value: i64,
    window_days: i64,
) -> i64 {
    let deadline = match deadline {
        Some(deadline) => deadline,
        None => return 0,
    };

    let negotiated = match negotiation_date.and_hms_opt(0, 0, 0) {
        Some(dt) => dt,
        None => return 0,
    };

    let days_apart = (negotiated - deadline).num_days().abs();
    if days_apart <= window_days {
        value
    } else {
        0
    }
}

/// Applies the configured duplicate policy to the full transfer store
pub fn dedup_rows(rows: Vec<TransferRow>, policy: DuplicatePolicy) -> Vec<TransferRow> {
    match policy {
        DuplicatePolicy::CollapseToOne => {
            let mut seen = HashSet::new();
            rows.into_iter()
                .filter(|row| seen.insert(row.clone()))
                .collect()
        }
        DuplicatePolicy::DropAllCopies => {
            let mut counts: HashMap<&TransferRow, usize> = HashMap::new();
            for row in &rows {
                *counts.entry(row).or_insert(0) += 1;
            }
            let unique: HashSet<TransferRow> = counts
                .into_iter()
                .filter(|(_, count)| *count == 1)
                .map(|(row, _)| row.clone())
                .collect();
            rows.into_iter().filter(|row| unique.contains(row)).collect()
        }
    }
}
