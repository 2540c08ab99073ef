//! Listing-row extraction
//!
//! Maps one row of the market search results to an [`AthleteSummary`].
//! Rows that do not carry the expected cells are skipped silently; the
//! listing is allowed to contain decorative or malformed rows.

use scraper::{ElementRef, Selector};

/// Number of position-significant skill columns in a listing row
pub const SKILL_COUNT: usize = 9;

/// Font color marking male athletes in the listing
const MALE_COLOR: &str = "#32A9AF";

/// Minimum cells a listing row must carry: country, name, age, secondary id,
/// specialty, then the skill columns.
const MIN_CELLS: usize = 5 + SKILL_COUNT;

/// Identity and skills of one athlete as shown on the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AthleteSummary {
    pub name: String,
    pub athlete_id: u32,
    pub sex: String,
    pub country: String,
    pub age: u32,
    pub secondary_id: u32,
    pub specialty: String,
    /// Fixed-width, position-significant skill scores
    pub skills: [u32; SKILL_COUNT],
}

/// Parses one listing row into an [`AthleteSummary`]
///
/// Returns `None` for rows lacking the minimum cell count or with
/// non-numeric identity/skill cells; such rows yield no record and no error.
pub fn parse_athlete_row(row: ElementRef) -> Option<AthleteSummary> {
    let td = Selector::parse("td").ok()?;
    let cells: Vec<ElementRef> = row.select(&td).collect();

    if cells.len() < MIN_CELLS {
        return None;
    }

    let a = Selector::parse("a").ok()?;
    let name_tag = cells[1].select(&a).next()?;
    let name = cell_text(&name_tag);
    let href = name_tag.value().attr("href")?;
    let athlete_id: u32 = href
        .split("aid=")
        .nth(1)?
        .split('&')
        .next()?
        .parse()
        .ok()?;

    let font = Selector::parse("font").ok()?;
    let sex = match cells[1].select(&font).next() {
        Some(tag) if tag.value().attr("color") == Some(MALE_COLOR) => "Male",
        _ => "Female",
    }
    .to_string();

    let img = Selector::parse("img").ok()?;
    let country = cells[0]
        .select(&img)
        .next()
        .and_then(|i| i.value().attr("title"))
        .unwrap_or("")
        .trim()
        .to_string();

    let age: u32 = cell_text(&cells[2]).parse().ok()?;
    let secondary_id: u32 = cell_text(&cells[3]).parse().ok()?;
    let specialty = cell_text(&cells[4]);

    let mut skills = [0u32; SKILL_COUNT];
    for (slot, cell) in skills.iter_mut().zip(&cells[5..5 + SKILL_COUNT]) {
        *slot = cell_text(cell).parse().ok()?;
    }

    Some(AthleteSummary {
        name,
        athlete_id,
        sex,
        country,
        age,
        secondary_id,
        specialty,
        skills,
    })
}

/// Collected, trimmed text content of an element
fn cell_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
