//! Merge engine
//!
//! Reconciles newly extracted records against the persisted stores:
//! - [`athlete`] - flattening and key-based dedup for the athlete database
//! - [`transfer`] - cross-day completion detection, deadline-window
//!   valuation, and full-row dedup for the transfer database

pub mod athlete;
pub mod transfer;

pub use athlete::{flatten, merge_athlete_rows};
pub use transfer::{assess_value, completed_ids, dedup_rows, DuplicatePolicy};
