//! Similarity scoring between a desired item and a library entry.

use strsim::normalized_levenshtein;

use crate::models::DesiredItem;

use super::normalize::normalize_title;
use super::options::MatchOptions;

/// Normalized title variants of a desired item (main title, then original title)
pub fn item_title_keys(item: &DesiredItem) -> Vec<String> {
    let mut keys = vec![normalize_title(&item.title)];
    if let Some(original) = &item.original_title {
        let key = normalize_title(original);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Similarity in 0..=1 of two already-normalized titles
pub fn title_similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Absolute year difference when both years are known
pub fn year_distance(a: Option<i32>, b: Option<i32>) -> Option<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.abs_diff(b)),
        _ => None,
    }
}

/// Scores one library entry. Blends in year equality when both sides carry
/// a year, otherwise returns the plain title similarity.
pub fn score_entry(
    item_keys: &[String],
    item_year: Option<i32>,
    entry_key: &str,
    entry_year: Option<i32>,
    options: &MatchOptions,
) -> f64 {
    let similarity = item_keys
        .iter()
        .map(|key| title_similarity(key, entry_key))
        .fold(0.0, f64::max);

    match year_distance(item_year, entry_year) {
        Some(distance) if options.year_weight > 0.0 => {
            let year_component = if distance == 0 { 1.0 } else { 0.0 };
            (1.0 - options.year_weight) * similarity + options.year_weight * year_component
        }
        _ => similarity,
    }
}
