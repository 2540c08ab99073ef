//! Search-result pagination
//!
//! Drives repeated fetches of the market listing until no "next page"
//! navigation link remains. A page without the expected results table is a
//! fatal, non-retried abort for the whole run (possible session expiry or
//! markup drift); a failed fetch on a follow-up page just stops pagination.

use crate::scrape::listing::{parse_athlete_row, AthleteSummary};
use crate::scrape::{body_excerpt, market_page_path, MARKET_PATH};
use crate::session::Session;
use crate::MarketError;
use scraper::{Html, Selector};

/// One parsed listing page
#[derive(Debug)]
pub struct ListingPage {
    pub athletes: Vec<AthleteSummary>,
    pub has_next: bool,
}

/// Parses one listing page body
///
/// Locates the results table, maps its data rows to summaries, and checks
/// for an anchor pointing at page `page + 1`. A table with only a header
/// row is a valid empty result set.
///
/// # Errors
///
/// [`MarketError::MissingResultsTable`] when the results table is absent,
/// carrying a bounded excerpt of the body for diagnosis.
pub fn parse_listing_page(body: &str, page: u32) -> Result<ListingPage, MarketError> {
    let document = Html::parse_document(body);

    let table_selector = Selector::parse("table.results")
        .map_err(|e| structural_error(page, body, &e.to_string()))?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| structural_error(page, body, "no table with class 'results'"))?;

    let mut athletes = Vec::new();
    if let Ok(tr) = Selector::parse("tr") {
        // First row is the header
        for row in table.select(&tr).skip(1) {
            if let Some(summary) = parse_athlete_row(row) {
                athletes.push(summary);
            }
        }
    }

    let has_next = has_next_page_link(&document, page + 1);

    Ok(ListingPage { athletes, has_next })
}

/// Fetches and parses every listing page for an already-submitted search
///
/// Submits the search form, then follows `?p=N&bm=` pages until no next-page
/// anchor is found. A fetch failure on a follow-up page stops pagination and
/// keeps the rows collected so far.
pub async fn collect_listing(
    session: &Session,
    search_form: &[(&str, &str)],
) -> Result<Vec<AthleteSummary>, MarketError> {
    let mut body = session.post_form(MARKET_PATH, search_form).await?;
    let mut page = 1u32;
    let mut athletes = Vec::new();

    loop {
        let parsed = parse_listing_page(&body, page)?;
        athletes.extend(parsed.athletes);

        if !parsed.has_next {
            break;
        }

        tracing::debug!("Scraped page {}", page);
        page += 1;

        body = match session.get(&market_page_path(page)).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Stopping pagination at page {}: {}", page, e);
                break;
            }
        };
    }

    Ok(athletes)
}

/// Whether the page links to listing page `next`
fn has_next_page_link(document: &Html, next: u32) -> bool {
    let suffix = market_page_path(next);
    match Selector::parse(&format!("a[href$='{}']", suffix)) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

fn structural_error(page: u32, body: &str, detail: &str) -> MarketError {
    tracing::error!(
        "Could not find the expected results table on page {} ({}); possible session expiration or page structure change",
        page,
        detail
    );
    MarketError::MissingResultsTable {
        page: format!("listing page {}", page),
        excerpt: body_excerpt(body),
    }
}
