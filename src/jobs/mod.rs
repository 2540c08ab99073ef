//! Daily jobs
//!
//! The two daily jobs and the weekly backup, wired from the lower layers:
//! - [`roster`] - crawl the free-agent market and merge into the athlete
//!   database
//! - [`transfers`] - snapshot the open transfer market and record completed
//!   transfers
//! - [`backup`] - weekday-gated copy of both databases
//!
//! Each dated job checks for its own output file first and becomes a no-op
//! when it already exists, making re-runs on the same day harmless.

pub mod backup;
pub mod roster;
pub mod transfers;

/// Search filters for the roster job: free agents currently on the market
pub(crate) const ROSTER_SEARCH: &[(&str, &str)] = &[
    ("min_forza", "0"),
    ("new_scadenza", "0"),
    ("youth", "0"),
    ("mercato", "1"),
    ("libero", "1"),
    ("new_sesso", "2"),
    ("ric_1", "Search"),
];

/// Search filters for the transfer job: club athletes with a listing
/// expiring within the site's window
pub(crate) const TRANSFER_SEARCH: &[(&str, &str)] = &[
    ("min_forza", "0"),
    ("new_scadenza", "144"),
    ("youth", "0"),
    ("mercato", "1"),
    ("libero", "0"),
    ("new_sesso", "2"),
    ("ric_1", "Search"),
];
