//! HTML extraction for the market site
//!
//! One module per page type, so a markup change on the site requires a
//! change in exactly one place:
//! - [`paginator`] - search-result listing pages and "next page" detection
//! - [`listing`] - one listing row -> [`AthleteSummary`]
//! - [`profile`] - athlete detail page -> [`PhysicalProfile`]
//! - [`weekly_tests`] - weekly performance table -> [`TestResult`]s
//! - [`negotiation`] - negotiation-history page -> (date, value)

pub mod listing;
pub mod negotiation;
pub mod paginator;
pub mod profile;

pub use listing::AthleteSummary;
pub use profile::PhysicalProfile;
pub use weekly_tests::TestResult;

/// Path of the market search/listing endpoint
pub const MARKET_PATH: &str = "/varie/mercato.php";

/// Path of the athlete detail page
pub const PROFILE_PATH: &str = "/user/atleta_one.php";

/// Path of the weekly-test page
pub const WEEKLY_TESTS_PATH: &str = "/user/test_settimanali.php";

/// Path of the negotiation-history page
pub const NEGOTIATION_PATH: &str = "/user/trasf_one.php";

/// Listing page N, fetched by GET after the initial search POST
pub fn market_page_path(page: u32) -> String {
    format!("{}?p={}&bm=", MARKET_PATH, page)
}

/// Detail page for one athlete
pub fn profile_path(athlete_id: u32) -> String {
    format!("{}?aid={}&tipo=aid", PROFILE_PATH, athlete_id)
}

/// Weekly-test page for one athlete
pub fn weekly_tests_path(athlete_id: u32) -> String {
    format!("{}?aid={}", WEEKLY_TESTS_PATH, athlete_id)
}

/// Negotiation-history page for one athlete
pub fn negotiation_path(athlete_id: u32) -> String {
    format!("{}?aid={}", NEGOTIATION_PATH, athlete_id)
}

/// Everything extracted for one athlete during one crawl
///
/// Lives in memory only for the duration of the run; the merge engine turns
/// it into persisted rows.
#[derive(Debug, Clone)]
pub struct AthleteRecord {
    pub summary: AthleteSummary,
    pub profile: PhysicalProfile,
    pub results: Vec<TestResult>,
}

/// Bounded response excerpt attached to structural parse failures
pub(crate) fn body_excerpt(body: &str) -> String {
    body.chars().take(500).collect()
}
