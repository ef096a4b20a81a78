//! Pure parsing helpers for individual IMDB export fields.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IMDB_ID_RE: Regex = Regex::new(r"tt\d+").unwrap();
    static ref CONST_RE: Regex = Regex::new(r"^tt\d+$").unwrap();
}

/// Earliest plausible release year; anything before is treated as garbage
const MIN_YEAR: i32 = 1870;
const MAX_YEAR: i32 = 2100;

/// Extracts the first `tt…` id from an IMDB URL or free text
pub fn find_imdb_id(text: &str) -> Option<String> {
    IMDB_ID_RE.find(text).map(|m| m.as_str().to_string())
}

/// Resolves the IMDB id of a row, preferring the `Const` column over the URL
pub fn resolve_imdb_id(const_field: Option<&str>, url_field: Option<&str>) -> Option<String> {
    if let Some(value) = const_field.map(str::trim) {
        if CONST_RE.is_match(value) {
            return Some(value.to_string());
        }
    }
    url_field.and_then(find_imdb_id)
}

/// Parses a year column. Empty means unknown, anything else must be a plausible year.
pub fn parse_year(value: &str) -> Result<Option<i32>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<i32>() {
        Ok(year) if (MIN_YEAR..=MAX_YEAR).contains(&year) => Ok(Some(year)),
        Ok(year) => Err(format!("Year out of range: {year}")),
        Err(_) => Err(format!("Unparseable year '{trimmed}'")),
    }
}

/// Returns the trimmed value, or None when it is blank
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "field_parsers_tests.rs"]
mod tests;
