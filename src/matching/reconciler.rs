//! Reconciliation of desired items against a library snapshot.
//!
//! Items are processed in input order and every [`MatchResult::Matched`]
//! claims its library entry, so no entry is ever assigned twice. Exact IMDB id
//! matches are claimed in a first pass before any fuzzy matching happens.

use log::{debug, info};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::imdb::{ParsedRow, RowDiagnostic};
use crate::models::{
    Candidate, DesiredItem, LibraryEntry, MatchMethod, MatchResult, UnmatchedReason,
};

use super::normalize::normalize_title;
use super::options::MatchOptions;
use super::score::{item_title_keys, score_entry, year_distance};

/// Tolerance for float comparisons of scores against threshold and margin
const SCORE_EPSILON: f64 = 1e-9;

enum Pending<'a> {
    Item(&'a DesiredItem),
    Invalid(&'a RowDiagnostic),
}

/// Matches every desired item against the library. Returns one result per
/// item, in input order.
pub fn reconcile(
    desired: &[DesiredItem],
    library: &[LibraryEntry],
    options: &MatchOptions,
) -> Vec<MatchResult> {
    let pending: Vec<Pending> = desired.iter().map(Pending::Item).collect();
    run(&pending, library, options)
}

/// Like [`reconcile`], but over parsed CSV rows. Invalid rows become
/// `Unmatched` with their diagnostic note, in place.
pub fn reconcile_rows(
    rows: &[ParsedRow],
    library: &[LibraryEntry],
    options: &MatchOptions,
) -> Vec<MatchResult> {
    let pending: Vec<Pending> = rows
        .iter()
        .map(|row| match row {
            ParsedRow::Valid(item) => Pending::Item(item),
            ParsedRow::Invalid(diag) => Pending::Invalid(diag),
        })
        .collect();
    run(&pending, library, options)
}

fn run(pending: &[Pending], library: &[LibraryEntry], options: &MatchOptions) -> Vec<MatchResult> {
    info!(
        "Reconciling {} items against {} library entries",
        pending.len(),
        library.len()
    );

    let entry_keys: Vec<String> = library.iter().map(|e| normalize_title(&e.title)).collect();
    let mut claimed = vec![false; library.len()];
    let mut results: Vec<Option<MatchResult>> = vec![None; pending.len()];

    // First pass: invalid rows and exact IMDB ids
    let id_index = index_by_imdb_id(library);
    for (slot, pending) in pending.iter().enumerate() {
        match pending {
            Pending::Invalid(diag) => {
                results[slot] = Some(MatchResult::Unmatched {
                    item: diag.to_item(),
                    reason: UnmatchedReason::InvalidRow(diag.note.clone()),
                });
            }
            Pending::Item(item) => {
                let key = item.external_id.to_ascii_lowercase();
                let found = id_index
                    .get(key.as_str())
                    .and_then(|indices| indices.iter().copied().find(|&i| !claimed[i]));
                if let Some(idx) = found {
                    claimed[idx] = true;
                    debug!(
                        "'{}' matched by IMDB id {} to '{}'",
                        item.title,
                        item.external_id,
                        library[idx].label()
                    );
                    results[slot] = Some(MatchResult::Matched {
                        item: (*item).clone(),
                        entry: library[idx].clone(),
                        score: 1.0,
                        method: MatchMethod::ExternalId,
                    });
                }
            }
        }
    }

    // Second pass: fuzzy titles, greedy in input order
    for (slot, pending) in pending.iter().enumerate() {
        if results[slot].is_some() {
            continue;
        }
        if let Pending::Item(item) = pending {
            results[slot] = Some(fuzzy_match(item, library, &entry_keys, &mut claimed, options));
        }
    }

    results.into_iter().flatten().collect()
}

fn index_by_imdb_id(library: &[LibraryEntry]) -> HashMap<String, Vec<usize>> {
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, entry) in library.iter().enumerate() {
        if let Some(id) = &entry.imdb_id {
            index.entry(id.to_ascii_lowercase()).or_default().push(i);
        }
    }
    index
}

fn fuzzy_match(
    item: &DesiredItem,
    library: &[LibraryEntry],
    entry_keys: &[String],
    claimed: &mut [bool],
    options: &MatchOptions,
) -> MatchResult {
    if library.is_empty() {
        return MatchResult::Unmatched {
            item: item.clone(),
            reason: UnmatchedReason::EmptyLibrary,
        };
    }

    let item_keys = item_title_keys(item);
    let mut scored: Vec<(usize, f64)> = library
        .iter()
        .enumerate()
        .filter(|(i, _)| !claimed[*i])
        .filter(|(_, entry)| within_drift(item.year, entry.year, options.max_year_drift))
        .map(|(i, entry)| {
            let score = score_entry(&item_keys, item.year, &entry_keys[i], entry.year, options);
            (i, score)
        })
        .collect();

    if scored.is_empty() {
        return MatchResult::Unmatched {
            item: item.clone(),
            reason: UnmatchedReason::NoCandidate,
        };
    }

    // stable sort: equal scores keep library order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let (best_idx, best_score) = scored[0];
    if best_score + SCORE_EPSILON < options.threshold {
        debug!(
            "'{}' best candidate '{}' scored {:.3}, below {:.3}",
            item.title,
            library[best_idx].label(),
            best_score,
            options.threshold
        );
        return MatchResult::Unmatched {
            item: item.clone(),
            reason: UnmatchedReason::BelowThreshold {
                best_score,
                best_title: library[best_idx].label(),
            },
        };
    }

    let clear_lead = scored
        .get(1)
        .map_or(true, |&(_, runner_up)| best_score - runner_up + SCORE_EPSILON >= options.margin);

    if !clear_lead {
        let candidates: Vec<Candidate> = scored
            .iter()
            .take(options.max_candidates)
            .map(|&(i, score)| Candidate {
                entry: library[i].clone(),
                score,
            })
            .collect();
        debug!(
            "'{}' is ambiguous between {} candidates",
            item.title,
            candidates.len()
        );
        return MatchResult::Ambiguous {
            item: item.clone(),
            candidates,
        };
    }

    claimed[best_idx] = true;
    let entry = library[best_idx].clone();
    let method = if year_distance(item.year, entry.year) == Some(0) {
        MatchMethod::TitleYear
    } else {
        MatchMethod::Title
    };
    debug!(
        "'{}' fuzzy matched to '{}' with score {:.3} ({})",
        item.title,
        entry.label(),
        best_score,
        method.as_str()
    );
    MatchResult::Matched {
        item: item.clone(),
        entry,
        score: best_score,
        method,
    }
}

fn within_drift(item_year: Option<i32>, entry_year: Option<i32>, max_drift: Option<u32>) -> bool {
    match (year_distance(item_year, entry_year), max_drift) {
        (Some(distance), Some(max)) => distance <= max,
        _ => true,
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
