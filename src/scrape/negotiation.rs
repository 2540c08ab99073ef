//! Negotiation-history extraction
//!
//! Parses an athlete's negotiation-history page into the most recent
//! `(date, value)` pair. Athletes that were never negotiated, and any table
//! shape other than the expected one, yield the sentinel pair
//! (minimum date, zero value).

use chrono::NaiveDate;
use scraper::{Html, Selector};

/// Marker text shown when an athlete has no negotiation history
pub const NEVER_NEGOTIATED_MARKER: &str = "This athlete has never been negotiated.";

const NEGOTIATION_DATE_FORMAT: &str = "%d-%m-%Y";

/// Index of the data row holding the most recent negotiation
/// (row 0 is an aggregate line; the latest entry sits below it)
const LATEST_ROW_INDEX: usize = 1;

/// Sentinel returned for athletes without a usable negotiation history
pub fn sentinel() -> (NaiveDate, i64) {
    (NaiveDate::MIN, 0)
}

/// Parses the negotiation-history page
///
/// Inspects the second data row of the results table and reads the date
/// from its first cell and the currency-formatted value from its fourth.
/// Everything else - the never-negotiated marker, a missing table, too few
/// rows or cells, malformed fields - returns [`sentinel`].
pub fn parse_negotiation(body: &str) -> (NaiveDate, i64) {
    let document = Html::parse_document(body);

    let text: String = document.root_element().text().collect();
    if text.contains(NEVER_NEGOTIATED_MARKER) {
        return sentinel();
    }

    parse_latest_entry(&document).unwrap_or_else(sentinel)
}

fn parse_latest_entry(document: &Html) -> Option<(NaiveDate, i64)> {
    let table_selector = Selector::parse("table.results").ok()?;
    let table = document.select(&table_selector).next()?;

    let tr = Selector::parse("tr").ok()?;
    // Skip the header row, then take the latest-entry row
    let row = table.select(&tr).skip(1).nth(LATEST_ROW_INDEX)?;

    let td = Selector::parse("td").ok()?;
    let cells: Vec<String> = row
        .select(&td)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();

    if cells.len() < 4 {
        return None;
    }

    let date = NaiveDate::parse_from_str(&cells[0], NEGOTIATION_DATE_FORMAT).ok()?;
    let value = parse_currency(&cells[3])?;

    Some((date, value))
}

/// Parses a currency-formatted value like "€ 1.000" into 1000
///
/// Strips the currency symbol and the thousands separators, then parses
/// the remaining digits as an integer.
pub fn parse_currency(text: &str) -> Option<i64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '€' | '.') && !c.is_whitespace())
        .collect();
    cleaned.parse().ok()
}
