//! Athlete detail-page extraction
//!
//! Parses fixed-position profile fields. Every field is recovered
//! independently: a malformed or missing field degrades to the `"Unknown"`
//! placeholder (or `None`/`false` for the typed fields) and never aborts
//! the athlete.

use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};

/// Placeholder for profile fields that failed to parse
pub const UNKNOWN: &str = "Unknown";

const EXPERIENCE_LABEL: &str = "Experience:";
const MOOD_LABEL: &str = "Mood:";
const DEADLINE_LABEL: &str = "Deadline:";
const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Physical and status fields from one athlete's detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalProfile {
    pub height: String,
    pub weight: String,
    pub form: String,
    pub experience: String,
    pub mood: String,
    pub favorite_discipline: String,
    pub has_club: bool,
    /// Present only while the athlete is listed on the transfer market
    pub deadline: Option<NaiveDateTime>,
}

/// Parses an athlete detail page
///
/// Never fails; each field falls back to its placeholder on its own.
pub fn parse_profile(body: &str) -> PhysicalProfile {
    let document = Html::parse_document(body);

    let (height, weight) = parse_physique(&document);

    let form = select_text(&document, "div.box strong").unwrap_or_else(|| UNKNOWN.to_string());

    let experience = scoped_labelled_strong(&document, "div.box.box_right", EXPERIENCE_LABEL)
        .unwrap_or_else(|| UNKNOWN.to_string());

    let mood = nth_scoped_labelled_strong(&document, "div.row.gray", 1, MOOD_LABEL)
        .unwrap_or_else(|| UNKNOWN.to_string());

    let favorite_discipline = select_text(&document, "h4.heading strong.right")
        .unwrap_or_else(|| UNKNOWN.to_string());

    let has_club = select_text(&document, "div.col01 strong")
        .map(|text| !text.is_empty())
        .unwrap_or(false);

    let deadline = labelled_strong_anywhere(&document, DEADLINE_LABEL)
        .and_then(|text| NaiveDateTime::parse_from_str(&text, DEADLINE_FORMAT).ok());

    PhysicalProfile {
        height,
        weight,
        form,
        experience,
        mood,
        favorite_discipline,
        has_club,
        deadline,
    }
}

/// Height and weight from the second `div.col02`, "183 cm - 79 kg" style
fn parse_physique(document: &Html) -> (String, String) {
    let unknown = || (UNKNOWN.to_string(), UNKNOWN.to_string());

    let col = match Selector::parse("div.col02") {
        Ok(selector) => match document.select(&selector).nth(1) {
            Some(col) => col,
            None => return unknown(),
        },
        Err(_) => return unknown(),
    };

    let strong = match Selector::parse("strong") {
        Ok(selector) => match col.select(&selector).next() {
            Some(strong) => strong,
            None => return unknown(),
        },
        Err(_) => return unknown(),
    };

    let text = element_text(&strong);
    let mut parts = text.split(" - ");
    match (
        parts.next().and_then(leading_number),
        parts.next().and_then(leading_number),
    ) {
        (Some(height), Some(weight)) => (height, weight),
        _ => unknown(),
    }
}

/// First whitespace-delimited token, kept only if it is an integer
fn leading_number(text: &str) -> Option<String> {
    let token = text.trim().split_whitespace().next()?;
    token.parse::<u32>().ok()?;
    Some(token.to_string())
}

/// Text of the first element matching a selector
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
}

/// `<span>Label:</span> ... <strong>value</strong>` inside the first match
/// of `scope`
fn scoped_labelled_strong(document: &Html, scope: &str, label: &str) -> Option<String> {
    nth_scoped_labelled_strong(document, scope, 0, label)
}

/// Same as [`scoped_labelled_strong`] but against the nth match of `scope`
fn nth_scoped_labelled_strong(
    document: &Html,
    scope: &str,
    index: usize,
    label: &str,
) -> Option<String> {
    let scope = Selector::parse(scope).ok()?;
    let element = document.select(&scope).nth(index)?;
    labelled_strong(&element, label)
}

/// Searches the whole document for a labelled strong pair
fn labelled_strong_anywhere(document: &Html, label: &str) -> Option<String> {
    let root = document.root_element();
    labelled_strong(&root, label)
}

/// Finds a span whose text equals `label` and returns the text of the next
/// `strong` element following it in document order
fn labelled_strong(scope: &ElementRef, label: &str) -> Option<String> {
    let span = Selector::parse("span").ok()?;

    for candidate in scope.select(&span) {
        if element_text(&candidate) != label {
            continue;
        }

        for node in candidate.next_siblings() {
            if let Some(element) = ElementRef::wrap(node) {
                if element.value().name() == "strong" {
                    let text = element_text(&element);
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
        }
    }

    None
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
